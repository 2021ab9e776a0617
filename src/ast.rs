use std::fmt::Debug;

/// Trait implemented by the user-supplied AST payload type. `null()` is the placeholder
/// value used for productions that synthesize no meaningful payload of their own (the
/// augmented start rule, the empty-list alternative of a nullable repeat).
pub trait NodeImpl: Debug + Clone {
    fn null() -> Self;
}

/// The tree produced by a parse: a user payload plus the span it covers and the children
/// its callback chose to keep. Mirrors the span-carrying AST wrapper this corpus's
/// combinator engine used (`node`, `start`, `end`, `children`), minus the filtered-stream
/// bookkeeping that engine needed and this table-driven one does not.
#[derive(Debug, Clone)]
pub struct AstNode<N> {
    pub value: N,
    pub start: usize,
    pub stop: usize,
    pub children: Vec<AstNode<N>>,
}

impl<N> AstNode<N> {
    pub fn new(value: N, start: usize, stop: usize, children: Vec<AstNode<N>>) -> Self {
        Self {
            value,
            start,
            stop,
            children,
        }
    }

    pub fn leaf(value: N, start: usize, stop: usize) -> Self {
        Self::new(value, start, stop, Vec::new())
    }
}
