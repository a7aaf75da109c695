use super::{describe, is_reserved, Parser, MAX_NESTING};
use crate::ast::{Filter, Operation};
use crate::error::PolicyError;
use crate::lexer::Token;

/// Compose `left op right`. A left operand that is already a node of the
/// same operation absorbs `right` instead of being nested, so a chain
/// `a AND b AND c` becomes one node with three children. Only the left
/// operand is inspected: `a AND (b AND c)` stays nested.
fn compose(op: Operation, mut left: Filter, right: Filter) -> Filter {
    if left.op == op {
        left.inner.push(right);
        left
    } else {
        Filter::composite(op, vec![left, right])
    }
}

impl<'a> Parser<'a> {
    // -- Filter expressions --------------------------------------
    //
    // expr     := and_expr (OR and_expr)*
    // and_expr := term (AND term)*
    // term     := '(' expr ')' | '@' ident | key cmp_op value

    pub(super) fn parse_filter_expr(&mut self) -> Result<Filter, PolicyError> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> Result<Filter, PolicyError> {
        let mut left = self.parse_and_expr()?;
        while self.is_keyword("OR") {
            self.advance();
            let right = self.parse_and_expr()?;
            left = compose(Operation::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and_expr(&mut self) -> Result<Filter, PolicyError> {
        let mut left = self.parse_term()?;
        while self.is_keyword("AND") {
            self.advance();
            let right = self.parse_term()?;
            left = compose(Operation::And, left, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Filter, PolicyError> {
        match self.peek() {
            Token::LParen => {
                if self.depth >= MAX_NESTING {
                    return Err(self.err("filter expression nested too deeply"));
                }
                self.advance();
                self.depth += 1;
                let e = self.parse_filter_expr();
                self.depth -= 1;
                let e = e?;
                self.expect_rparen()?;
                Ok(e)
            }
            Token::At => {
                self.advance();
                let name = self.take_ident()?;
                Ok(Filter::reference(name))
            }
            _ => {
                let key = self.parse_key()?;
                let op = self.parse_compare_op()?;
                let value = self.parse_value()?;
                Ok(Filter::leaf(key, op, value))
            }
        }
    }

    fn parse_compare_op(&mut self) -> Result<Operation, PolicyError> {
        let op = match self.peek() {
            Token::Word(w) => {
                Operation::from_mnemonic(&w.to_ascii_uppercase()).filter(|op| op.is_comparison())
            }
            _ => None,
        };
        match op {
            Some(op) => {
                self.advance();
                Ok(op)
            }
            None => Err(self.err(format!(
                "expected comparison operator, got {}",
                describe(self.peek())
            ))),
        }
    }

    fn parse_key(&mut self) -> Result<String, PolicyError> {
        match self.peek().clone() {
            Token::Str(s) => {
                self.advance();
                Ok(s)
            }
            Token::Word(_) => self.take_ident(),
            other => Err(self.err(format!("expected filter key, got {}", describe(&other)))),
        }
    }

    fn parse_value(&mut self) -> Result<String, PolicyError> {
        match self.peek().clone() {
            Token::Str(s) | Token::Number(s) => {
                self.advance();
                Ok(s)
            }
            Token::Word(w) if !is_reserved(&w) => {
                self.advance();
                Ok(w)
            }
            other => Err(self.err(format!("expected filter value, got {}", describe(&other)))),
        }
    }
}
