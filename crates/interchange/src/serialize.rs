//! Policy -> interchange JSON. Canonical output: sorted keys, default
//! values omitted, array order preserved.

use placement_core::{Filter, PlacementPolicy, Replica, Selector};
use serde_json::{json, Map, Value};

/// Encode a policy as compact JSON bytes. Never fails.
pub fn to_json(policy: &PlacementPolicy) -> Vec<u8> {
    to_value(policy).to_string().into_bytes()
}

pub fn to_value(policy: &PlacementPolicy) -> Value {
    let mut m = Map::new();
    if policy.container_backup_factor != 0 {
        m.insert(
            "container_backup_factor".to_owned(),
            json!(policy.container_backup_factor),
        );
    }
    if !policy.filters.is_empty() {
        let filters: Vec<Value> = policy.filters.iter().map(serialize_filter).collect();
        m.insert("filters".to_owned(), Value::Array(filters));
    }
    let replicas: Vec<Value> = policy.replicas.iter().map(serialize_replica).collect();
    m.insert("replicas".to_owned(), Value::Array(replicas));
    if !policy.selectors.is_empty() {
        let selectors: Vec<Value> = policy.selectors.iter().map(serialize_selector).collect();
        m.insert("selectors".to_owned(), Value::Array(selectors));
    }
    tracing::trace!(
        replicas = policy.replicas.len(),
        selectors = policy.selectors.len(),
        filters = policy.filters.len(),
        "policy encoded"
    );
    Value::Object(m)
}

fn insert_str(m: &mut Map<String, Value>, field: &str, s: &str) {
    if !s.is_empty() {
        m.insert(field.to_owned(), json!(s));
    }
}

fn serialize_replica(r: &Replica) -> Value {
    let mut m = Map::new();
    m.insert("count".to_owned(), json!(r.count));
    insert_str(&mut m, "selector", &r.selector);
    Value::Object(m)
}

fn serialize_selector(s: &Selector) -> Value {
    let mut m = Map::new();
    m.insert("attribute".to_owned(), json!(s.attribute));
    if let Some(clause) = s.clause.mnemonic() {
        m.insert("clause".to_owned(), json!(clause));
    }
    m.insert("count".to_owned(), json!(s.count));
    insert_str(&mut m, "filter", &s.filter);
    insert_str(&mut m, "name", &s.name);
    Value::Object(m)
}

fn serialize_filter(f: &Filter) -> Value {
    let mut m = Map::new();
    if !f.inner.is_empty() {
        let inner: Vec<Value> = f.inner.iter().map(serialize_filter).collect();
        m.insert("filters".to_owned(), Value::Array(inner));
    }
    insert_str(&mut m, "key", &f.key);
    insert_str(&mut m, "name", &f.name);
    if let Some(op) = f.op.mnemonic() {
        m.insert("op".to_owned(), json!(op));
    }
    insert_str(&mut m, "value", &f.value);
    Value::Object(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use placement_core::{Clause, Operation};

    #[test]
    fn empty_policy_has_only_replicas() {
        assert_eq!(to_value(&PlacementPolicy::default()), json!({"replicas": []}));
    }

    #[test]
    fn defaults_are_omitted() {
        let p = PlacementPolicy {
            replicas: vec![Replica {
                count: 2,
                selector: String::new(),
            }],
            selectors: vec![Selector {
                count: 1,
                filter: "*".into(),
                ..Selector::default()
            }],
            ..PlacementPolicy::default()
        };
        assert_eq!(
            to_value(&p),
            json!({
                "replicas": [{"count": 2}],
                "selectors": [{"attribute": "", "count": 1, "filter": "*"}]
            })
        );
    }

    #[test]
    fn nested_filters_and_enums() {
        let p = PlacementPolicy {
            container_backup_factor: 3,
            selectors: vec![Selector {
                name: "S".into(),
                attribute: "City".into(),
                filter: "F".into(),
                count: 2,
                clause: Clause::Distinct,
            }],
            filters: vec![Filter::composite(
                Operation::Or,
                vec![
                    Filter::leaf("A", Operation::Gt, "1"),
                    Filter::reference("G"),
                ],
            )
            .with_name("F")],
            ..PlacementPolicy::default()
        };
        assert_eq!(
            to_value(&p),
            json!({
                "container_backup_factor": 3,
                "filters": [{
                    "filters": [{"key": "A", "op": "GT", "value": "1"}, {"name": "G"}],
                    "name": "F",
                    "op": "OR"
                }],
                "replicas": [],
                "selectors": [{
                    "attribute": "City",
                    "clause": "DISTINCT",
                    "count": 2,
                    "filter": "F",
                    "name": "S"
                }]
            })
        );
    }

    #[test]
    fn bytes_are_compact_json() {
        let bytes = to_json(&PlacementPolicy::default());
        assert_eq!(bytes, br#"{"replicas":[]}"#.to_vec());
    }
}
