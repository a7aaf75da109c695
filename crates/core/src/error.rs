/// A policy compilation error. Every failure aborts the whole operation;
/// only the first one encountered is reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Malformed token stream or grammar violation.
    #[error("{line}:{column}: {message}")]
    Syntax {
        line: u32,
        column: u32,
        message: String,
    },

    /// A count or backup factor literal does not fit in 32 unsigned bits.
    #[error("{line}:{column}: invalid number '{literal}': out of range for u32")]
    InvalidNumber {
        line: u32,
        column: u32,
        literal: String,
    },

    #[error("unknown operation '{0}'")]
    UnknownOp(String),

    #[error("unknown clause '{0}'")]
    UnknownClause(String),

    /// A selector references a filter that is not declared.
    #[error("filter not found: '{0}'")]
    UnknownFilter(String),

    /// A replica references a selector that is not declared.
    #[error("selector not found: '{0}'")]
    UnknownSelector(String),
}

impl PolicyError {
    pub fn syntax(line: u32, column: u32, message: impl Into<String>) -> Self {
        PolicyError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Stable tag used in JSON error reports and conformance fixtures.
    pub fn kind(&self) -> &'static str {
        match self {
            PolicyError::Syntax { .. } => "syntax",
            PolicyError::InvalidNumber { .. } => "invalid_number",
            PolicyError::UnknownOp(_) => "unknown_op",
            PolicyError::UnknownClause(_) => "unknown_clause",
            PolicyError::UnknownFilter(_) => "unknown_filter",
            PolicyError::UnknownSelector(_) => "unknown_selector",
        }
    }

    /// Source position, for errors raised while reading policy text.
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            PolicyError::Syntax { line, column, .. }
            | PolicyError::InvalidNumber { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }

    /// The offending name or mnemonic, for reference and enum errors.
    pub fn name(&self) -> Option<&str> {
        match self {
            PolicyError::UnknownOp(n)
            | PolicyError::UnknownClause(n)
            | PolicyError::UnknownFilter(n)
            | PolicyError::UnknownSelector(n) => Some(n),
            PolicyError::InvalidNumber { literal, .. } => Some(literal),
            PolicyError::Syntax { .. } => None,
        }
    }

    /// Serialize to the expected-error.json format.
    /// All fields are always present (null when not applicable).
    pub fn to_json_value(&self) -> serde_json::Value {
        let (line, column) = match self.position() {
            Some((l, c)) => (Some(l), Some(c)),
            None => (None, None),
        };
        serde_json::json!({
            "column":  column,
            "kind":    self.kind(),
            "line":    line,
            "message": self.to_string(),
            "name":    self.name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_json_carries_position() {
        let e = PolicyError::syntax(2, 7, "expected 'AS'");
        let v = e.to_json_value();
        assert_eq!(v["kind"], "syntax");
        assert_eq!(v["line"], 2);
        assert_eq!(v["column"], 7);
        assert!(v["name"].is_null());
        assert_eq!(v["message"], "2:7: expected 'AS'");
    }

    #[test]
    fn reference_error_json_carries_name() {
        let v = PolicyError::UnknownFilter("Missing".into()).to_json_value();
        assert_eq!(v["kind"], "unknown_filter");
        assert_eq!(v["name"], "Missing");
        assert!(v["line"].is_null());
    }
}
