//! Policies keep their shape through text -> JSON -> policy and
//! JSON -> policy -> JSON.

use placement_core::{format_policy, parse, validate, PolicyError};
use placement_interchange::{from_json, to_json, InterchangeError};
use pretty_assertions::assert_eq;

const SOURCES: &[&str] = &[
    "REP 1",
    "REP 3 IN X CBF 4 SELECT 3 IN DISTINCT City FROM * AS X",
    "REP 1\nSELECT 1 IN City FROM F\nFILTER A EQ 1 AND B EQ 2 OR C EQ 3 AS F",
    "REP 2 IN Y\nSELECT 2 IN SAME Zone FROM G AS Y\nFILTER @H OR (K GE 0 AND K LT 10) AS G\nFILTER 'a key' NE \"a value\" AS H",
    "FILTER A EQ 1 AND (B EQ 2 AND C EQ 3) AND D EQ 4 AS F",
];

#[test]
fn parse_then_json_round_trip() {
    for src in SOURCES {
        let policy = parse(src).unwrap();
        let decoded = from_json(&to_json(&policy)).unwrap();
        assert_eq!(decoded, policy, "source: {}", src);
    }
}

#[test]
fn json_then_text_round_trip() {
    for src in SOURCES {
        let policy = parse(src).unwrap();
        let decoded = from_json(&to_json(&policy)).unwrap();
        assert_eq!(parse(&format_policy(&decoded)).unwrap(), policy);
    }
}

#[test]
fn json_then_struct_then_json() {
    let doc = br#"{"container_backup_factor":1,"filters":[{"filters":[{"key":"A","op":"LE","value":"9"},{"name":"Ref"}],"name":"F","op":"OR"}],"replicas":[{"count":2,"selector":"S"}],"selectors":[{"attribute":"","count":1,"filter":"F","name":"S"}]}"#;
    let policy = from_json(doc).unwrap();
    assert_eq!(to_json(&policy), doc.to_vec());
}

#[test]
fn decoding_does_not_validate_references() {
    let doc = br#"{"replicas":[{"count":1,"selector":"Nowhere"}],"selectors":[{"count":1,"attribute":"","filter":"Missing","name":"S"}]}"#;
    let policy = from_json(doc).unwrap();
    assert_eq!(validate(&policy), Err(PolicyError::UnknownFilter("Missing".into())));
}

#[test]
fn unknown_op_from_json() {
    let err = from_json(br#"{"filters":[{"op":"BOGUS"}]}"#).unwrap_err();
    assert!(matches!(err, InterchangeError::Policy(PolicyError::UnknownOp(ref op)) if op == "BOGUS"));
}
