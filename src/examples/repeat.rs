//! A single nonterminal built entirely from one repetition operator: `list -> a*`. Exercises
//! the repeat desugaring and the conventional [`VecListBuilder`] in isolation, with no other
//! grammar machinery in the way.

use crate::{Grammar, GrammarBuilder, LexicalElement, NodeImpl, VecListBuilder};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatNode;

impl NodeImpl for RepeatNode {
    fn null() -> Self {
        RepeatNode
    }
}

pub fn grammar() -> Result<Grammar<VecListBuilder, RepeatNode>, crate::GrammarError> {
    let mut b = GrammarBuilder::<VecListBuilder, RepeatNode>::new();

    let a = b.terminal("A", r"^a");
    let list = b.nonterminal("list");
    let a_sym = b.terminal_symbol(a);

    b.rule(
        list,
        vec![LexicalElement::repeat(LexicalElement::param(a_sym), None, true)],
        Rc::new(crate::identity),
    );

    b.start(list);
    b.build()
}
