//! Placement policy data model.
//!
//! These types are produced by the parser (text path) and by the
//! interchange decoder (JSON path), and consumed by the validator, the
//! formatter and the encoder. They carry no behaviour beyond construction
//! helpers and the mnemonic tables shared by every path.

// ──────────────────────────────────────────────
// Operation / Clause mnemonic tables
// ──────────────────────────────────────────────

/// Filter operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    #[default]
    Unspecified,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    And,
    Or,
}

/// Every operation with a spelling. `Unspecified` has none.
const OPERATION_MNEMONICS: [(Operation, &str); 8] = [
    (Operation::Eq, "EQ"),
    (Operation::Ne, "NE"),
    (Operation::Gt, "GT"),
    (Operation::Ge, "GE"),
    (Operation::Lt, "LT"),
    (Operation::Le, "LE"),
    (Operation::And, "AND"),
    (Operation::Or, "OR"),
];

impl Operation {
    /// Exact (uppercase) lookup. Returns `None` for anything outside the table.
    pub fn from_mnemonic(s: &str) -> Option<Operation> {
        OPERATION_MNEMONICS
            .iter()
            .find(|(_, m)| *m == s)
            .map(|(op, _)| *op)
    }

    pub fn mnemonic(self) -> Option<&'static str> {
        OPERATION_MNEMONICS
            .iter()
            .find(|(op, _)| *op == self)
            .map(|(_, m)| *m)
    }

    /// AND / OR.
    pub fn is_composite(self) -> bool {
        matches!(self, Operation::And | Operation::Or)
    }

    /// EQ, NE, GT, GE, LT, LE.
    pub fn is_comparison(self) -> bool {
        !self.is_composite() && self != Operation::Unspecified
    }
}

/// Selector uniqueness mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Clause {
    #[default]
    Unspecified,
    Same,
    Distinct,
}

const CLAUSE_MNEMONICS: [(Clause, &str); 2] =
    [(Clause::Same, "SAME"), (Clause::Distinct, "DISTINCT")];

impl Clause {
    pub fn from_mnemonic(s: &str) -> Option<Clause> {
        CLAUSE_MNEMONICS
            .iter()
            .find(|(_, m)| *m == s)
            .map(|(c, _)| *c)
    }

    pub fn mnemonic(self) -> Option<&'static str> {
        CLAUSE_MNEMONICS
            .iter()
            .find(|(c, _)| *c == self)
            .map(|(_, m)| *m)
    }
}

// ──────────────────────────────────────────────
// Policy nodes
// ──────────────────────────────────────────────

/// A comparison, a composition of sub-filters, or a reference to a named
/// top-level filter (`@name`).
///
/// `inner` is non-empty exactly when `op` is AND or OR. References are kept
/// as placeholders and never resolved to the filter they name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub name: String,
    pub key: String,
    pub op: Operation,
    pub value: String,
    pub inner: Vec<Filter>,
}

impl Filter {
    pub fn leaf(key: impl Into<String>, op: Operation, value: impl Into<String>) -> Self {
        Filter {
            key: key.into(),
            op,
            value: value.into(),
            ..Filter::default()
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Filter {
            name: name.into(),
            ..Filter::default()
        }
    }

    pub fn composite(op: Operation, inner: Vec<Filter>) -> Self {
        Filter {
            op,
            inner,
            ..Filter::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_reference(&self) -> bool {
        self.op == Operation::Unspecified
            && self.key.is_empty()
            && self.inner.is_empty()
            && !self.name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    /// Empty means the selector cannot be referenced by a replica.
    pub name: String,
    /// Grouping key; empty means no grouping.
    pub attribute: String,
    /// Name of a top-level filter, or [`PlacementPolicy::WILDCARD`].
    pub filter: String,
    pub count: u32,
    pub clause: Clause,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Replica {
    pub count: u32,
    /// Empty means the replica applies to the whole network directly.
    pub selector: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementPolicy {
    pub replicas: Vec<Replica>,
    /// 0 means unset.
    pub container_backup_factor: u32,
    pub selectors: Vec<Selector>,
    pub filters: Vec<Filter>,
}

impl PlacementPolicy {
    /// Filter reference that matches every node.
    pub const WILDCARD: &'static str = "*";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_table_is_bidirectional() {
        for (op, m) in OPERATION_MNEMONICS {
            assert_eq!(op.mnemonic(), Some(m));
            assert_eq!(Operation::from_mnemonic(m), Some(op));
        }
        assert_eq!(Operation::Unspecified.mnemonic(), None);
        assert_eq!(Operation::from_mnemonic(""), None);
        assert_eq!(Operation::from_mnemonic("eq"), None);
    }

    #[test]
    fn clause_table_is_bidirectional() {
        assert_eq!(Clause::from_mnemonic("SAME"), Some(Clause::Same));
        assert_eq!(Clause::from_mnemonic("DISTINCT"), Some(Clause::Distinct));
        assert_eq!(Clause::Distinct.mnemonic(), Some("DISTINCT"));
        assert_eq!(Clause::Unspecified.mnemonic(), None);
        assert_eq!(Clause::from_mnemonic("UNIQUE"), None);
    }

    #[test]
    fn operation_classes() {
        assert!(Operation::And.is_composite());
        assert!(Operation::Or.is_composite());
        assert!(Operation::Le.is_comparison());
        assert!(!Operation::Unspecified.is_comparison());
        assert!(!Operation::Unspecified.is_composite());
    }

    #[test]
    fn reference_filter_shape() {
        let r = Filter::reference("Main");
        assert!(r.is_reference());
        assert!(!Filter::leaf("Country", Operation::Eq, "DE").is_reference());
        assert!(!Filter::default().is_reference());
    }
}
