//! placement-core: placement policy compiler.
//!
//! Turns policy source text into a validated [`PlacementPolicy`]:
//!
//! ```text
//! REP 3 IN X
//! CBF 2
//! SELECT 3 IN DISTINCT City FROM Good AS X
//! FILTER Country EQ DE AND Rating GE 4 AS Good
//! ```
//!
//! # Public API
//!
//! - [`parse()`] -- lex, parse and validate policy text
//! - [`validate()`] -- cross-reference check on an existing policy
//! - [`format_policy()`] -- render a policy back to source text
//! - [`PolicyError`] -- error type shared by every stage
//! - Model types: [`PlacementPolicy`], [`Replica`], [`Selector`],
//!   [`Filter`], [`Operation`], [`Clause`]

pub mod ast;
pub mod compile;
pub mod error;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod validate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{Clause, Filter, Operation, PlacementPolicy, Replica, Selector};
pub use error::PolicyError;

// ── Convenience re-exports: entry points ─────────────────────────────

pub use compile::parse;
pub use format::format_policy;
pub use validate::validate;
