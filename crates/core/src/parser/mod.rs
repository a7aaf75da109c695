//! Recursive-descent parser from the token stream to a [`PlacementPolicy`].
//! Only local checks happen here (statement order, count ranges, operator
//! spelling); cross-references are the validator's job.

use crate::ast::PlacementPolicy;
use crate::error::PolicyError;
use crate::lexer::{Spanned, Token};

mod constructs;
mod expressions;

/// Words that can never be used as identifiers. The statement keywords
/// (REP, IN, AS, SELECT, FROM, FILTER) are soft and double as identifiers.
const RESERVED: [&str; 11] = [
    "AND", "OR", "EQ", "NE", "GT", "GE", "LT", "LE", "CBF", "SAME", "DISTINCT",
];

/// Deepest parenthesis nesting accepted in a filter expression. Matches the
/// recursion limit `serde_json` applies on the JSON path.
const MAX_NESTING: usize = 128;

pub(crate) fn is_reserved(word: &str) -> bool {
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(word))
}

fn describe(token: &Token) -> String {
    match token {
        Token::Word(w) => format!("'{}'", w),
        Token::Str(s) => format!("string literal '{}'", s),
        Token::Number(n) => format!("number {}", n),
        Token::LParen => "'('".to_owned(),
        Token::RParen => "')'".to_owned(),
        Token::At => "'@'".to_owned(),
        Token::Star => "'*'".to_owned(),
        Token::Eof => "end of input".to_owned(),
    }
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// Open parentheses around the current filter term.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn advance(&mut self) -> &Spanned {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn err(&self, msg: impl Into<String>) -> PolicyError {
        let cur = self.cur();
        PolicyError::syntax(cur.line, cur.column, msg)
    }

    /// Case-insensitive keyword test.
    fn is_keyword(&self, kw: &str) -> bool {
        matches!(self.peek(), Token::Word(w) if w.eq_ignore_ascii_case(kw))
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<(), PolicyError> {
        if self.is_keyword(kw) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '{}', got {}", kw, describe(self.peek()))))
        }
    }

    fn expect_rparen(&mut self) -> Result<(), PolicyError> {
        if self.peek() == &Token::RParen {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected ')', got {}", describe(self.peek()))))
        }
    }

    fn take_ident(&mut self) -> Result<String, PolicyError> {
        match self.peek().clone() {
            Token::Word(w) if !is_reserved(&w) => {
                self.advance();
                Ok(w)
            }
            other => Err(self.err(format!("expected identifier, got {}", describe(&other)))),
        }
    }

    /// A positive count that fits in 32 bits.
    fn take_count(&mut self) -> Result<u32, PolicyError> {
        let cur = self.cur().clone();
        match cur.token {
            Token::Number(n) if n == "0" => Err(self.err("count must be positive, got 0")),
            Token::Number(n) => {
                let value = n.parse::<u32>().map_err(|_| PolicyError::InvalidNumber {
                    line: cur.line,
                    column: cur.column,
                    literal: n,
                })?;
                self.advance();
                Ok(value)
            }
            other => Err(self.err(format!("expected count, got {}", describe(&other)))),
        }
    }

    // -- Top level ------------------------------------------------

    /// REP* CBF? SELECT* FILTER* EOF
    fn parse_policy(&mut self) -> Result<PlacementPolicy, PolicyError> {
        let mut policy = PlacementPolicy::default();

        while self.is_keyword("REP") {
            policy.replicas.push(self.parse_replica()?);
        }
        if self.is_keyword("CBF") {
            policy.container_backup_factor = self.parse_backup_factor()?;
        }
        while self.is_keyword("SELECT") {
            policy.selectors.push(self.parse_selector()?);
        }
        while self.is_keyword("FILTER") {
            policy.filters.push(self.parse_filter_stmt()?);
        }

        if self.peek() != &Token::Eof {
            let is_statement = ["REP", "CBF", "SELECT", "FILTER"]
                .iter()
                .any(|kw| self.is_keyword(kw));
            let msg = if is_statement {
                format!(
                    "unexpected {}: statements must appear in the order REP, CBF, SELECT, FILTER",
                    describe(self.peek())
                )
            } else {
                format!("expected statement, got {}", describe(self.peek()))
            };
            return Err(self.err(msg));
        }

        Ok(policy)
    }
}

/// Build a policy from a token stream. Stops at the first error.
///
/// The stream must end with [`Token::Eof`], as [`crate::lexer::lex`] output
/// always does.
pub fn parse(tokens: &[Spanned]) -> Result<PlacementPolicy, PolicyError> {
    match tokens.last() {
        Some(last) if last.token == Token::Eof => {}
        Some(last) => {
            return Err(PolicyError::syntax(
                last.line,
                last.column,
                "token stream does not end with end of input",
            ))
        }
        None => return Err(PolicyError::syntax(1, 1, "empty token stream")),
    }
    let mut p = Parser::new(tokens);
    p.parse_policy()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
