//! A parent grammar's rules reused unchanged by a child grammar built on top of them, and
//! rebuilt from scratch elsewhere to check that the construction pipeline is deterministic:
//! two independent calls to [`item_rules`] must yield byte-for-byte identical tables.

use crate::{AstNode, Grammar, GrammarBuilder, LexicalElement, NodeImpl, NonterminalId};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitNode;

impl NodeImpl for UnitNode {
    fn null() -> Self {
        UnitNode
    }
}

pub struct UnitBuilder;

/// Neither `parent` nor `child` uses the repeat operator, so these are never actually
/// called; `build` still requires the bound.
impl crate::ListBuilder<UnitNode> for UnitBuilder {
    fn make_list(&mut self, start: usize, stop: usize, first: Option<AstNode<UnitNode>>) -> AstNode<UnitNode> {
        AstNode::new(UnitNode, start, stop, first.into_iter().collect())
    }

    fn expand_list(&mut self, start: usize, stop: usize, mut list: AstNode<UnitNode>, next: AstNode<UnitNode>) -> AstNode<UnitNode> {
        list.children.push(next);
        list.start = start;
        list.stop = stop;
        list
    }
}

/// Declares one terminal and one nonterminal (`item -> A`) on `b` and returns the
/// nonterminal, so a caller can either start a grammar from it directly or wrap it in a
/// nonterminal of their own (the "inheritance" relationship under test).
pub fn item_rules(b: &mut GrammarBuilder<UnitBuilder, UnitNode>) -> NonterminalId {
    let a = b.terminal("A", r"^a");
    let item = b.nonterminal("item");
    let a_sym = b.terminal_symbol(a);
    b.rule(item, vec![LexicalElement::param(a_sym)], Rc::new(crate::identity));
    item
}

pub fn parent() -> Result<Grammar<UnitBuilder, UnitNode>, crate::GrammarError> {
    let mut b = GrammarBuilder::<UnitBuilder, UnitNode>::new();
    let item = item_rules(&mut b);
    b.start(item);
    b.build()
}

/// Wraps the parent's `item` nonterminal in a fresh `wrapped -> item` rule, inheriting every
/// rule `item_rules` declared without re-specifying any of them.
pub fn child() -> Result<Grammar<UnitBuilder, UnitNode>, crate::GrammarError> {
    let mut b = GrammarBuilder::<UnitBuilder, UnitNode>::new();
    let item = item_rules(&mut b);
    let wrapped = b.nonterminal("wrapped");
    let item_sym = b.nonterminal_symbol(item);
    b.rule(
        wrapped,
        vec![LexicalElement::param(item_sym)],
        Rc::new(|_builder: &mut UnitBuilder, start, stop, args: Vec<AstNode<UnitNode>>| {
            AstNode::new(UnitNode, start, stop, args)
        }),
    );
    b.start(wrapped);
    b.build()
}
