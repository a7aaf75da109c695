//! Cross-reference validation: selectors must name declared filters and
//! replicas must name declared selectors.

use crate::ast::PlacementPolicy;
use crate::error::PolicyError;
use std::collections::HashSet;

/// Check every selector → filter and replica → selector reference.
///
/// Name sets are built from the complete policy, so a selector may refer to
/// a filter declared after it. The first dangling reference is returned;
/// selectors are checked before replicas.
pub fn validate(policy: &PlacementPolicy) -> Result<(), PolicyError> {
    let filters: HashSet<&str> = policy
        .filters
        .iter()
        .filter(|f| !f.name.is_empty())
        .map(|f| f.name.as_str())
        .collect();

    for s in &policy.selectors {
        if s.filter != PlacementPolicy::WILDCARD && !filters.contains(s.filter.as_str()) {
            return Err(PolicyError::UnknownFilter(s.filter.clone()));
        }
    }

    let selectors: HashSet<&str> = policy
        .selectors
        .iter()
        .filter(|s| !s.name.is_empty())
        .map(|s| s.name.as_str())
        .collect();

    for r in &policy.replicas {
        if !r.selector.is_empty() && !selectors.contains(r.selector.as_str()) {
            return Err(PolicyError::UnknownSelector(r.selector.clone()));
        }
    }

    tracing::debug!(
        filters = filters.len(),
        selectors = selectors.len(),
        "policy references resolved"
    );
    Ok(())
}
