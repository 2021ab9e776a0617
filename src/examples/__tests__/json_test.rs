use crate::examples::json::{self, JsonBuilder, JsonNode};
use crate::ParseErrorKind;

#[test]
fn strict_json_accepts_empty_object() {
    let grammar = json::strict().unwrap();
    let mut builder = JsonBuilder::new("{}");
    let node = grammar.parse("{}", &mut builder).unwrap();
    assert_eq!(node.value, JsonNode::Object(Vec::new()));
}

#[test]
fn strict_json_rejects_an_array_at_the_root() {
    let grammar = json::strict().unwrap();
    let mut builder = JsonBuilder::new("[]");
    match grammar.parse("[]", &mut builder) {
        Err(ParseErrorKind::Parse(err)) => {
            assert_eq!(err.token_type_name, "OB");
            assert_eq!(err.expected, vec!["OC".to_string()]);
        }
        other => panic!("expected a rejected parse, got {:?}", other.map(|n| n.value)),
    }
}

#[test]
fn strict_json_parses_nested_objects_and_arrays() {
    let grammar = json::strict().unwrap();
    let text = r#"{"a":1,"b":[true,false,null],"c":{"d":"e"}}"#;
    let mut builder = JsonBuilder::new(text);
    let node = grammar.parse(text, &mut builder).unwrap();

    let JsonNode::Object(members) = node.value else {
        panic!("expected an object at the root");
    };
    assert_eq!(members.len(), 3);
    assert_eq!(members[0], ("a".to_string(), JsonNode::Number(1.0)));
    assert_eq!(
        members[1],
        (
            "b".to_string(),
            JsonNode::Array(vec![JsonNode::Bool(true), JsonNode::Bool(false), JsonNode::Null])
        )
    );
    assert_eq!(
        members[2],
        ("c".to_string(), JsonNode::Object(vec![("d".to_string(), JsonNode::String("e".to_string()))]))
    );
}

#[test]
fn lenient_json_accepts_a_bare_scalar_at_the_root() {
    let grammar = json::lenient().unwrap();

    let mut builder = JsonBuilder::new("null");
    assert_eq!(grammar.parse("null", &mut builder).unwrap().value, JsonNode::Null);

    let mut builder = JsonBuilder::new("1e+1");
    assert_eq!(grammar.parse("1e+1", &mut builder).unwrap().value, JsonNode::Number(10.0));
}

#[test]
fn lenient_json_accepts_a_bare_array_at_the_root() {
    let grammar = json::lenient().unwrap();
    let text = "[1, true, null]";
    let mut builder = JsonBuilder::new(text);
    let node = grammar.parse(text, &mut builder).unwrap();
    assert_eq!(
        node.value,
        JsonNode::Array(vec![JsonNode::Number(1.0), JsonNode::Bool(true), JsonNode::Null])
    );
}

#[test]
fn error_message_names_the_offending_terminal_and_expected_set() {
    let grammar = json::strict().unwrap();
    let mut builder = JsonBuilder::new("true");
    let err = grammar.parse("true", &mut builder).unwrap_err();
    let message = err.to_string();
    assert!(
        message.starts_with("Unexpected token: 'true' (BOOLEAN), expected one of: OC"),
        "unexpected message: {}",
        message
    );
}
