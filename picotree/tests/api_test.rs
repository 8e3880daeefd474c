// SPDX-License-Identifier: Apache-2.0

// Tests for the public parsing API

use picotree::{parse, parse_slice, Dictionary, ParseError, TreeParser, Value, ValueKind};

#[test]
fn test_mixed_document() {
    let tree = parse(r#"{"a":1,"b":[true,false,null]}"#).unwrap();
    assert_eq!(tree.kind(), ValueKind::Dictionary);

    let dict = tree.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get("a").unwrap().try_get_int(), Ok(1));

    let list = dict.get("b").unwrap().as_list().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].try_get_bool(), Ok(true));
    assert_eq!(list[1].try_get_bool(), Ok(false));
    assert!(list[2].is_null());
}

#[test]
fn test_string_escapes() {
    let tree = parse(r#"["line1\nline2\t\"q\""]"#).unwrap();
    let decoded = tree.as_list().unwrap()[0].try_get_string().unwrap();
    assert_eq!(decoded, "line1\nline2\t\"q\"");
    assert_eq!(decoded.len(), 16);
}

#[test]
#[allow(clippy::approx_constant)]
fn test_number_classification() {
    let tree = parse("[-12, 3.14, 2e3]").unwrap();
    let list = tree.as_list().unwrap();
    assert_eq!(list[0], Value::Integer(-12));
    assert_eq!(list[1].kind(), ValueKind::Float);
    assert_eq!(list[1].try_get_float(), Ok(3.14));
    assert_eq!(list[2].try_get_float(), Ok(2000.0));
    assert!(list[2].try_get_int().is_err());
}

#[test]
fn test_duplicate_keys_keep_insertion_order() {
    let tree = parse(r#"{"x":1,"x":2}"#).unwrap();
    let dict = tree.as_dict().unwrap();
    let entries: Vec<_> = dict.iter().collect();
    assert_eq!(
        entries,
        vec![("x", &Value::Integer(1)), ("x", &Value::Integer(2))]
    );
    // Lookups return the first entry
    assert_eq!(dict.get("x"), Some(&Value::Integer(1)));
    assert_eq!(dict.get_last("x"), Some(&Value::Integer(2)));
}

#[test]
fn test_structural_violations() {
    assert!(parse(r#"{"a":1,}"#).unwrap_err().is_structure_error());
    assert!(parse("[1 2]").unwrap_err().is_structure_error());
}

#[test]
fn test_depth_guard_boundary() {
    let limit = 16u8;
    let parser = TreeParser::with_depth_limit(limit);

    let mut balanced = "[".repeat(limit as usize);
    balanced.push_str(&"]".repeat(limit as usize));
    assert_eq!(parser.parse(&balanced).unwrap().depth(), limit as usize);

    let overflow = "[".repeat(limit as usize + 1);
    assert!(matches!(
        parser.parse(&overflow),
        Err(ParseError::DepthExceeded { limit: 16, .. })
    ));
}

#[test]
fn test_parse_slice_matches_parse() {
    let json = r#"{"name": "value", "number": 42, "bool": true}"#;
    assert_eq!(parse_slice(json.as_bytes()), parse(json));
}

#[test]
fn test_tree_built_by_hand_matches_parsed() {
    let mut inner = Dictionary::new();
    inner.append("amount", Value::from("27000.50"));
    inner.append("currency", Value::from("USD"));
    let mut expected = Value::dictionary();
    expected.append(Some("data".into()), inner.into()).unwrap();

    let parsed = parse(r#"{"data": {"amount": "27000.50", "currency": "USD"}}"#).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn test_accessor_type_mismatch() {
    let tree = parse(r#"{"s": "text"}"#).unwrap();
    assert_eq!(
        tree.as_list(),
        Err(ParseError::TypeMismatch {
            expected: ValueKind::List,
            found: ValueKind::Dictionary
        })
    );
    let s = tree.pointer(&["s"]).unwrap();
    assert_eq!(
        s.try_get_float(),
        Err(ParseError::TypeMismatch {
            expected: ValueKind::Float,
            found: ValueKind::String
        })
    );
}

#[test]
fn test_tree_depth() {
    let tree = parse(r#"{"a": [1, {"b": []}], "c": {}}"#).unwrap();
    assert_eq!(tree.depth(), 4);
    assert_eq!(tree.pointer(&["c"]).unwrap().depth(), 1);
    assert_eq!(tree.pointer(&["a"]).unwrap().relative_depth(1), 4);
}
