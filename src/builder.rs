use crate::ast::{AstNode, NodeImpl};
use std::rc::Rc;

/// Bound semantic action for a rule, captured at grammar-build time. Modeled as a closure
/// over the builder's method table rather than a tagged enum, so a grammar author can
/// reference any method on their own `Builder` type directly.
pub type Callback<B, N> = Rc<dyn Fn(&mut B, usize, usize, Vec<AstNode<N>>) -> AstNode<N>>;

/// Capability required of every builder used with the repetition operator: the
/// normalizer synthesizes callbacks that call straight through to these two methods.
pub trait ListBuilder<N: NodeImpl> {
    /// Start a new list from the first matched element, or an empty list if the repeat
    /// normalized to its `allow_empty` alternative with nothing consumed.
    fn make_list(&mut self, start: usize, stop: usize, first: Option<AstNode<N>>) -> AstNode<N>;
    /// Append one more element (and, structurally, its separator) to an existing list.
    fn expand_list(&mut self, start: usize, stop: usize, list: AstNode<N>, next: AstNode<N>) -> AstNode<N>;
}

/// Produces no payload of its own; used for the augmented start rule and for hidden
/// separators/punctuation that contribute no value.
pub fn noop<B, N: NodeImpl>(_builder: &mut B, start: usize, stop: usize, _args: Vec<AstNode<N>>) -> AstNode<N> {
    AstNode::leaf(N::null(), start, stop)
}

/// Passes a single child through unchanged, asserting the span the driver computed for this
/// rule matches the span already carried by the child.
pub fn identity<B, N: NodeImpl>(_builder: &mut B, start: usize, stop: usize, mut args: Vec<AstNode<N>>) -> AstNode<N> {
    debug_assert_eq!(args.len(), 1, "identity callback expects exactly one argument");
    let node = args.remove(0);
    debug_assert_eq!(node.start, start, "identity: start span mismatch");
    debug_assert_eq!(node.stop, stop, "identity: stop span mismatch");
    node
}

/// A minimal [`ListBuilder`] for AST payload types that only need a `Vec` of children
/// threaded through, with no synthesized wrapper node of their own. Grammar authors with
/// richer list nodes (e.g. a dedicated `Array` variant) implement `ListBuilder` themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct VecListBuilder;

impl<N: NodeImpl> ListBuilder<N> for VecListBuilder {
    fn make_list(&mut self, start: usize, stop: usize, first: Option<AstNode<N>>) -> AstNode<N> {
        let children = first.into_iter().collect();
        AstNode::new(N::null(), start, stop, children)
    }

    fn expand_list(&mut self, start: usize, stop: usize, mut list: AstNode<N>, next: AstNode<N>) -> AstNode<N> {
        list.children.push(next);
        list.start = start;
        list.stop = stop;
        list
    }
}
