//! Deserialization from interchange JSON into a [`PlacementPolicy`].
//!
//! The main entry point is [`from_json`]; [`from_value`] works on an
//! already-parsed `serde_json::Value`. Absent members take their default
//! value and unknown members are ignored.

use placement_core::{Clause, Filter, Operation, PlacementPolicy, PolicyError, Replica, Selector};
use serde_json::{Map, Value};

/// Errors during interchange JSON deserialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterchangeError {
    /// The document is not valid JSON or a member has the wrong shape.
    #[error("malformed policy document: {0}")]
    Malformed(String),

    /// An enum member holds a spelling outside its closed set.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl InterchangeError {
    /// Stable tag, matching [`PolicyError::kind`] for wrapped errors.
    pub fn kind(&self) -> &'static str {
        match self {
            InterchangeError::Malformed(_) => "malformed",
            InterchangeError::Policy(e) => e.kind(),
        }
    }

    pub fn to_json_value(&self) -> Value {
        match self {
            InterchangeError::Policy(e) => e.to_json_value(),
            InterchangeError::Malformed(_) => serde_json::json!({
                "column":  null,
                "kind":    self.kind(),
                "line":    null,
                "message": self.to_string(),
                "name":    null,
            }),
        }
    }
}

/// Decode policy JSON bytes. Does not validate cross-references.
pub fn from_json(data: &[u8]) -> Result<PlacementPolicy, InterchangeError> {
    let value: Value =
        serde_json::from_slice(data).map_err(|e| InterchangeError::Malformed(e.to_string()))?;
    from_value(&value)
}

pub fn from_value(value: &Value) -> Result<PlacementPolicy, InterchangeError> {
    let obj = as_object(value, "$")?;

    let replicas = array(obj, "replicas", "$")?
        .iter()
        .enumerate()
        .map(|(i, v)| parse_replica(v, &format!("$.replicas[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    let container_backup_factor = opt_u32(obj, "container_backup_factor", "$")?;

    let selectors = array(obj, "selectors", "$")?
        .iter()
        .enumerate()
        .map(|(i, v)| parse_selector(v, &format!("$.selectors[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    let filters = parse_filters(obj, "$")?;

    tracing::debug!(
        replicas = replicas.len(),
        selectors = selectors.len(),
        filters = filters.len(),
        "policy decoded"
    );

    Ok(PlacementPolicy {
        replicas,
        container_backup_factor,
        selectors,
        filters,
    })
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn as_object<'v>(value: &'v Value, path: &str) -> Result<&'v Map<String, Value>, InterchangeError> {
    value
        .as_object()
        .ok_or_else(|| InterchangeError::Malformed(format!("{}: expected object", path)))
}

/// An optional array member; absent or null means empty.
fn array<'v>(
    obj: &'v Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'v [Value], InterchangeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(InterchangeError::Malformed(format!(
            "{}.{}: expected array",
            path, field
        ))),
    }
}

fn opt_str(obj: &Map<String, Value>, field: &str, path: &str) -> Result<String, InterchangeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(InterchangeError::Malformed(format!(
            "{}.{}: expected string",
            path, field
        ))),
    }
}

fn opt_u32(obj: &Map<String, Value>, field: &str, path: &str) -> Result<u32, InterchangeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                InterchangeError::Malformed(format!(
                    "{}.{}: expected unsigned 32-bit integer, got {}",
                    path, field, v
                ))
            }),
    }
}

fn parse_replica(value: &Value, path: &str) -> Result<Replica, InterchangeError> {
    let obj = as_object(value, path)?;
    Ok(Replica {
        count: opt_u32(obj, "count", path)?,
        selector: opt_str(obj, "selector", path)?,
    })
}

fn parse_selector(value: &Value, path: &str) -> Result<Selector, InterchangeError> {
    let obj = as_object(value, path)?;
    let clause = opt_str(obj, "clause", path)?;
    let clause = if clause.is_empty() {
        Clause::Unspecified
    } else {
        Clause::from_mnemonic(&clause).ok_or(PolicyError::UnknownClause(clause))?
    };
    Ok(Selector {
        name: opt_str(obj, "name", path)?,
        attribute: opt_str(obj, "attribute", path)?,
        filter: opt_str(obj, "filter", path)?,
        count: opt_u32(obj, "count", path)?,
        clause,
    })
}

fn parse_filters(obj: &Map<String, Value>, path: &str) -> Result<Vec<Filter>, InterchangeError> {
    array(obj, "filters", path)?
        .iter()
        .enumerate()
        .map(|(i, v)| parse_filter(v, &format!("{}.filters[{}]", path, i)))
        .collect()
}

fn parse_filter(value: &Value, path: &str) -> Result<Filter, InterchangeError> {
    let obj = as_object(value, path)?;
    let op = opt_str(obj, "op", path)?;
    let op = if op.is_empty() {
        Operation::Unspecified
    } else {
        Operation::from_mnemonic(&op).ok_or(PolicyError::UnknownOp(op))?
    };
    Ok(Filter {
        name: opt_str(obj, "name", path)?,
        key: opt_str(obj, "key", path)?,
        op,
        value: opt_str(obj, "value", path)?,
        inner: parse_filters(obj, path)?,
    })
}
