use crate::examples::parens::{self, ParenBuilder, ParenNode};

#[test]
fn bare_word_passes_through_identity_rules() {
    let grammar = parens::grammar().unwrap();
    let mut builder = ParenBuilder::new("a");
    match grammar.parse("a", &mut builder) {
        Ok(node) => assert_eq!(node.value, ParenNode::Word("a".to_string())),
        Err(err) => panic!("{}", err),
    }
}

#[test]
fn wrapped_word_reduces_to_three_children() {
    let grammar = parens::grammar().unwrap();
    let mut builder = ParenBuilder::new("(a)");
    let outer = match grammar.parse("(a)", &mut builder) {
        Ok(node) => node,
        Err(err) => panic!("{}", err),
    };

    assert_eq!(outer.value, ParenNode::Wrapped);
    assert_eq!(outer.children.len(), 3);
    assert_eq!(outer.children[0].value, ParenNode::Null);
    assert_eq!(outer.children[1].value, ParenNode::Word("a".to_string()));
    assert_eq!(outer.children[2].value, ParenNode::Null);
}

#[test]
fn nested_wrapping_reduces_bottom_up() {
    let grammar = parens::grammar().unwrap();
    let mut builder = ParenBuilder::new("((a))");
    let outer = grammar.parse("((a))", &mut builder).unwrap();

    assert_eq!(outer.value, ParenNode::Wrapped);
    let inner = &outer.children[1];
    assert_eq!(inner.value, ParenNode::Wrapped);
    assert_eq!(inner.children[1].value, ParenNode::Word("a".to_string()));
}

#[test]
fn unmatched_open_paren_is_a_parse_error() {
    let grammar = parens::grammar().unwrap();
    let mut builder = ParenBuilder::new("(a");
    assert!(grammar.parse("(a", &mut builder).is_err());
}
