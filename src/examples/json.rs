//! Two JSON grammars sharing one rule set: a strict variant (root must be an object) and a
//! lenient variant (root may be any value), distinguished only by their start symbol. Covers
//! objects, arrays, strings, numbers, booleans and null, with whitespace left to the
//! tokenizer's `skip_unmatched` default rather than an explicit space terminal.

use crate::{AstNode, Grammar, GrammarBuilder, LexicalElement, NodeImpl};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonNode>),
    Object(Vec<(String, JsonNode)>),
    /// Intermediate value held by a `pair` reduction; unwrapped by the owning `object` rule.
    Pair(String, Box<JsonNode>),
    Empty,
}

impl NodeImpl for JsonNode {
    fn null() -> Self {
        JsonNode::Empty
    }
}

/// Holds the source so callbacks can recover string/number/boolean literals from the spans
/// the driver computed for them, and implements [`ListBuilder`] for the array and
/// object-member repeats.
pub struct JsonBuilder {
    pub source: Vec<u8>,
}

impl JsonBuilder {
    pub fn new(source: impl Into<Vec<u8>>) -> Self {
        Self { source: source.into() }
    }

    fn text(&self, start: usize, stop: usize) -> String {
        String::from_utf8_lossy(&self.source[start..stop]).into_owned()
    }

    /// Strips the surrounding quotes from a `STRING` token's span.
    fn unquote(&self, start: usize, stop: usize) -> String {
        String::from_utf8_lossy(&self.source[start + 1..stop - 1]).into_owned()
    }
}

impl crate::ListBuilder<JsonNode> for JsonBuilder {
    fn make_list(&mut self, start: usize, stop: usize, first: Option<AstNode<JsonNode>>) -> AstNode<JsonNode> {
        AstNode::new(JsonNode::Empty, start, stop, first.into_iter().collect())
    }

    fn expand_list(
        &mut self,
        start: usize,
        stop: usize,
        mut list: AstNode<JsonNode>,
        next: AstNode<JsonNode>,
    ) -> AstNode<JsonNode> {
        list.children.push(next);
        list.start = start;
        list.stop = stop;
        list
    }
}

enum Start {
    Object,
    Value,
}

fn build(start: Start) -> Result<Grammar<JsonBuilder, JsonNode>, crate::GrammarError> {
    let mut b = GrammarBuilder::<JsonBuilder, JsonNode>::new();

    let oc = b.terminal("OC", r"^\{");
    let cc = b.terminal("CC", r"^\}");
    let ob = b.terminal("OB", r"^\[");
    let cb = b.terminal("CB", r"^\]");
    let comma = b.terminal("COMMA", r"^,");
    let colon = b.terminal("COLON", r"^:");
    let string = b.terminal("STRING", r#"^"(?:[^"\\]|\\.)*""#);
    let number = b.terminal("NUMBER", r"^-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?");
    let boolean = b.terminal("BOOLEAN", r"^(?:true|false)");
    let nul = b.terminal("NULL", r"^null");

    let object = b.nonterminal("object");
    let pair = b.nonterminal("pair");
    let value = b.nonterminal("value");
    let array = b.nonterminal("array");

    let oc_sym = b.terminal_symbol(oc);
    let cc_sym = b.terminal_symbol(cc);
    let ob_sym = b.terminal_symbol(ob);
    let cb_sym = b.terminal_symbol(cb);
    let comma_sym = b.terminal_symbol(comma);
    let colon_sym = b.terminal_symbol(colon);
    let string_sym = b.terminal_symbol(string);
    let number_sym = b.terminal_symbol(number);
    let boolean_sym = b.terminal_symbol(boolean);
    let nul_sym = b.terminal_symbol(nul);
    let pair_sym = b.nonterminal_symbol(pair);
    let value_sym = b.nonterminal_symbol(value);
    let array_sym = b.nonterminal_symbol(array);
    let object_sym = b.nonterminal_symbol(object);

    b.rule(
        object,
        vec![
            LexicalElement::symbol(oc_sym),
            LexicalElement::repeat(LexicalElement::param(pair_sym), Some(LexicalElement::symbol(comma_sym)), true),
            LexicalElement::symbol(cc_sym),
        ],
        Rc::new(|_builder: &mut JsonBuilder, start, stop, mut args: Vec<AstNode<JsonNode>>| {
            let list = args.remove(0);
            let mut members = Vec::with_capacity(list.children.len());
            for child in list.children {
                match child.value {
                    JsonNode::Pair(key, value) => members.push((key, *value)),
                    other => unreachable!("object member reduced to non-pair node {:?}", other),
                }
            }
            AstNode::new(JsonNode::Object(members), start, stop, Vec::new())
        }),
    );

    b.rule(
        pair,
        vec![
            LexicalElement::param(string_sym),
            LexicalElement::symbol(colon_sym),
            LexicalElement::param(value_sym),
        ],
        Rc::new(|builder: &mut JsonBuilder, start, stop, mut args: Vec<AstNode<JsonNode>>| {
            let value_node = args.remove(1);
            let key_node = args.remove(0);
            let key = builder.unquote(key_node.start, key_node.stop);
            AstNode::leaf(JsonNode::Pair(key, Box::new(value_node.value)), start, stop)
        }),
    );

    b.rule(
        value,
        vec![LexicalElement::param(string_sym)],
        Rc::new(|builder: &mut JsonBuilder, start, stop, mut args: Vec<AstNode<JsonNode>>| {
            let node = args.remove(0);
            AstNode::leaf(JsonNode::String(builder.unquote(node.start, node.stop)), start, stop)
        }),
    );
    b.rule(
        value,
        vec![LexicalElement::param(number_sym)],
        Rc::new(|builder: &mut JsonBuilder, start, stop, mut args: Vec<AstNode<JsonNode>>| {
            let node = args.remove(0);
            let text = builder.text(node.start, node.stop);
            let number: f64 = text.parse().expect("NUMBER terminal produced unparseable text");
            AstNode::leaf(JsonNode::Number(number), start, stop)
        }),
    );
    b.rule(
        value,
        vec![LexicalElement::param(boolean_sym)],
        Rc::new(|builder: &mut JsonBuilder, start, stop, mut args: Vec<AstNode<JsonNode>>| {
            let node = args.remove(0);
            let text = builder.text(node.start, node.stop);
            AstNode::leaf(JsonNode::Bool(text == "true"), start, stop)
        }),
    );
    b.rule(
        value,
        vec![LexicalElement::param(nul_sym)],
        Rc::new(|_builder: &mut JsonBuilder, start, stop, _args: Vec<AstNode<JsonNode>>| {
            AstNode::leaf(JsonNode::Null, start, stop)
        }),
    );
    b.rule(value, vec![LexicalElement::param(array_sym)], Rc::new(crate::identity));
    b.rule(value, vec![LexicalElement::param(object_sym)], Rc::new(crate::identity));

    b.rule(
        array,
        vec![
            LexicalElement::symbol(ob_sym),
            LexicalElement::repeat(LexicalElement::param(value_sym), Some(LexicalElement::symbol(comma_sym)), true),
            LexicalElement::symbol(cb_sym),
        ],
        Rc::new(|_builder: &mut JsonBuilder, start, stop, mut args: Vec<AstNode<JsonNode>>| {
            let list = args.remove(0);
            let items = list.children.into_iter().map(|c| c.value).collect();
            AstNode::new(JsonNode::Array(items), start, stop, Vec::new())
        }),
    );

    b.start(match start {
        Start::Object => object,
        Start::Value => value,
    });
    b.build()
}

/// Root must be an object.
pub fn strict() -> Result<Grammar<JsonBuilder, JsonNode>, crate::GrammarError> {
    build(Start::Object)
}

/// Root may be any value.
pub fn lenient() -> Result<Grammar<JsonBuilder, JsonNode>, crate::GrammarError> {
    build(Start::Value)
}
