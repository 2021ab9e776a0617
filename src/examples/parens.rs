//! Balanced parentheses around a bare word: `A -> "(" | ")" | C`, `C -> \w+`,
//! `D -> C | "(" D ")"`, start = `D`.

use crate::{AstNode, Grammar, GrammarBuilder, LexicalElement, NodeImpl};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum ParenNode {
    Word(String),
    Wrapped,
    Null,
}

impl NodeImpl for ParenNode {
    fn null() -> Self {
        ParenNode::Null
    }
}

/// Holds the source so callbacks can recover a terminal's literal text from the span the
/// driver computed for it. Owned rather than borrowed so one `ParenBuilder` can be
/// constructed per parse without threading a lifetime through the grammar's type.
pub struct ParenBuilder {
    pub source: Vec<u8>,
}

impl ParenBuilder {
    pub fn new(source: impl Into<Vec<u8>>) -> Self {
        Self { source: source.into() }
    }

    fn text(&self, start: usize, stop: usize) -> String {
        String::from_utf8_lossy(&self.source[start..stop]).into_owned()
    }
}

/// This grammar has no repeat operator, so these are never actually called; `build` still
/// requires the bound.
impl crate::ListBuilder<ParenNode> for ParenBuilder {
    fn make_list(&mut self, start: usize, stop: usize, first: Option<AstNode<ParenNode>>) -> AstNode<ParenNode> {
        AstNode::new(ParenNode::Null, start, stop, first.into_iter().collect())
    }

    fn expand_list(&mut self, start: usize, stop: usize, mut list: AstNode<ParenNode>, next: AstNode<ParenNode>) -> AstNode<ParenNode> {
        list.children.push(next);
        list.start = start;
        list.stop = stop;
        list
    }
}

pub fn grammar() -> Result<Grammar<ParenBuilder, ParenNode>, crate::GrammarError> {
    let mut b = GrammarBuilder::<ParenBuilder, ParenNode>::new();

    let open = b.terminal("OPEN", r"^\(");
    let close = b.terminal("CLOSE", r"^\)");
    let word = b.terminal("WORD", r"^\w+");

    let a = b.nonterminal("A");
    let c = b.nonterminal("C");
    let d = b.nonterminal("D");

    let word_callback: Rc<dyn Fn(&mut ParenBuilder, usize, usize, Vec<AstNode<ParenNode>>) -> AstNode<ParenNode>> =
        Rc::new(|builder: &mut ParenBuilder, start, stop, _args| {
            AstNode::leaf(ParenNode::Word(builder.text(start, stop)), start, stop)
        });

    let open_sym = b.terminal_symbol(open);
    let close_sym = b.terminal_symbol(close);
    let word_sym = b.terminal_symbol(word);
    let c_sym = b.nonterminal_symbol(c);
    let d_sym = b.nonterminal_symbol(d);

    b.rule(a, vec![LexicalElement::param(open_sym)], word_callback.clone());
    b.rule(a, vec![LexicalElement::param(close_sym)], word_callback.clone());
    b.rule(a, vec![LexicalElement::param(c_sym)], Rc::new(crate::identity));

    b.rule(c, vec![LexicalElement::param(word_sym)], word_callback);

    b.rule(d, vec![LexicalElement::param(c_sym)], Rc::new(crate::identity));
    b.rule(
        d,
        vec![
            LexicalElement::param(open_sym),
            LexicalElement::param(d_sym),
            LexicalElement::param(close_sym),
        ],
        Rc::new(|_builder: &mut ParenBuilder, start, stop, args| AstNode::new(ParenNode::Wrapped, start, stop, args)),
    );

    b.start(d);
    b.build()
}
