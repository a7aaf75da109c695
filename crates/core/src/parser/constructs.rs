use super::Parser;
use crate::ast::{Clause, Filter, PlacementPolicy, Replica, Selector};
use crate::error::PolicyError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    /// REP count (IN selector)?
    pub(super) fn parse_replica(&mut self) -> Result<Replica, PolicyError> {
        self.advance();
        let count = self.take_count()?;
        let selector = if self.is_keyword("IN") {
            self.advance();
            self.take_ident()?
        } else {
            String::new()
        };
        tracing::trace!(count, selector = %selector, "replica statement");
        Ok(Replica { count, selector })
    }

    /// CBF count
    pub(super) fn parse_backup_factor(&mut self) -> Result<u32, PolicyError> {
        self.advance();
        let factor = self.take_count()?;
        tracing::trace!(factor, "backup factor statement");
        Ok(factor)
    }

    /// SELECT count (IN clause? attribute)? FROM (filter | *) (AS name)?
    pub(super) fn parse_selector(&mut self) -> Result<Selector, PolicyError> {
        self.advance();
        let count = self.take_count()?;

        let mut clause = Clause::Unspecified;
        let mut attribute = String::new();
        if self.is_keyword("IN") {
            self.advance();
            if let Some(c) = self.take_clause() {
                clause = c;
            }
            attribute = self.take_ident()?;
        }

        self.expect_keyword("FROM")?;
        let filter = if self.peek() == &Token::Star {
            self.advance();
            PlacementPolicy::WILDCARD.to_owned()
        } else {
            self.take_ident()?
        };

        let name = if self.is_keyword("AS") {
            self.advance();
            self.take_ident()?
        } else {
            String::new()
        };

        tracing::trace!(count, name = %name, filter = %filter, "select statement");
        Ok(Selector {
            name,
            attribute,
            filter,
            count,
            clause,
        })
    }

    /// SAME | DISTINCT, if present.
    fn take_clause(&mut self) -> Option<Clause> {
        let clause = match self.peek() {
            Token::Word(w) => Clause::from_mnemonic(&w.to_ascii_uppercase())?,
            _ => return None,
        };
        self.advance();
        Some(clause)
    }

    /// FILTER expr AS name
    pub(super) fn parse_filter_stmt(&mut self) -> Result<Filter, PolicyError> {
        self.advance();
        let expr = self.parse_filter_expr()?;
        self.expect_keyword("AS")?;
        let name = self.take_ident()?;
        tracing::trace!(name = %name, op = ?expr.op, "filter statement");
        Ok(expr.with_name(name))
    }
}
