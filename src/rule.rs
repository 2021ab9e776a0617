use crate::builder::Callback;
use crate::element::LexicalElement;
use crate::ids::{NonterminalId, RuleId, SymbolId};

/// A production as declared by the grammar author, before normalization. `rhs` may still
/// contain `Parameter` and `Repeat` lexical elements.
pub struct RawRule<B, N> {
    pub lhs: NonterminalId,
    pub rhs: Vec<LexicalElement>,
    pub callback: Callback<B, N>,
}

/// A production after normalization: pure BNF, stable rule index, resolved parameter
/// positions. Rule 0 is always the augmented rule `_START -> S`.
pub struct Rule<B, N> {
    pub id: RuleId,
    pub lhs: NonterminalId,
    pub rhs: Vec<SymbolId>,
    pub parameter_indices: Vec<u32>,
    pub callback: Callback<B, N>,
}

impl<B, N> Rule<B, N> {
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}
