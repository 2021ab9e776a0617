use crate::examples::repeat;
use crate::VecListBuilder;

#[test]
fn repeat_parses_from_empty_to_many() {
    let grammar = repeat::grammar().unwrap();
    for n in 0..=6 {
        let text: String = std::iter::repeat('a').take(n).collect();
        let mut builder = VecListBuilder;
        let node = match grammar.parse(text.as_str(), &mut builder) {
            Ok(node) => node,
            Err(err) => panic!("{} chars: {}", n, err),
        };
        assert_eq!(node.children.len(), n, "wrong child count for {:?}", text);
    }
}

#[test]
fn a_non_a_byte_stops_the_repeat() {
    let grammar = repeat::grammar().unwrap();
    let mut builder = VecListBuilder;
    let node = grammar.parse("aaa", &mut builder).unwrap();
    assert_eq!(node.children.len(), 3);
}
