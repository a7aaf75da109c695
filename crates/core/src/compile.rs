//! Policy compiler: source text -> validated [`PlacementPolicy`].
//!
//! This is a thin orchestrator that runs the lexer, the parser and the
//! validator in order and stops at the first error.

use crate::ast::PlacementPolicy;
use crate::error::PolicyError;
use crate::lexer;
use crate::parser;
use crate::validate;

/// Compile policy source text into a validated policy, or the first error
/// encountered.
pub fn parse(src: &str) -> Result<PlacementPolicy, PolicyError> {
    let tokens = lexer::lex(src)?;
    tracing::debug!(tokens = tokens.len(), "policy source tokenized");

    let policy = parser::parse(&tokens)?;
    tracing::debug!(
        replicas = policy.replicas.len(),
        selectors = policy.selectors.len(),
        filters = policy.filters.len(),
        "policy parsed"
    );

    validate::validate(&policy)?;
    Ok(policy)
}
