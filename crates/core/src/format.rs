//! Policy formatter: [`PlacementPolicy`] -> policy source text.
//!
//! Output uses uppercase keywords and one statement per line. Every
//! composite child is parenthesized, which is what lets a parsed policy
//! survive `parse(format_policy(p))` unchanged: the parser only flattens a
//! chain into its *left* operand, and parentheses never create nodes.

use crate::ast::{Clause, Filter, Operation, PlacementPolicy};
use crate::parser::is_reserved;
use std::fmt::{self, Write as _};

pub fn format_policy(policy: &PlacementPolicy) -> String {
    policy.to_string()
}

impl fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_policy(f, self)
    }
}

fn write_policy(w: &mut impl fmt::Write, policy: &PlacementPolicy) -> fmt::Result {
    let mut lines: Vec<String> = Vec::new();

    for r in &policy.replicas {
        let mut line = format!("REP {}", r.count);
        if !r.selector.is_empty() {
            write!(line, " IN {}", r.selector)?;
        }
        lines.push(line);
    }

    if policy.container_backup_factor != 0 {
        lines.push(format!("CBF {}", policy.container_backup_factor));
    }

    for s in &policy.selectors {
        let mut line = format!("SELECT {}", s.count);
        if !s.attribute.is_empty() {
            line.push_str(" IN");
            if let Some(m) = s.clause.mnemonic() {
                write!(line, " {}", m)?;
            }
            write!(line, " {}", s.attribute)?;
        } else if s.clause != Clause::Unspecified {
            // A clause without an attribute has no spelling; it is dropped.
            tracing::warn!(clause = ?s.clause, "selector clause without attribute not formatted");
        }
        write!(line, " FROM {}", s.filter)?;
        if !s.name.is_empty() {
            write!(line, " AS {}", s.name)?;
        }
        lines.push(line);
    }

    for f in &policy.filters {
        let mut line = String::from("FILTER ");
        write_expr(&mut line, f)?;
        write!(line, " AS {}", f.name)?;
        lines.push(line);
    }

    w.write_str(&lines.join("\n"))
}

fn write_expr(w: &mut String, f: &Filter) -> fmt::Result {
    if f.op.is_composite() {
        let sep = if f.op == Operation::And { " AND " } else { " OR " };
        for (i, inner) in f.inner.iter().enumerate() {
            if i > 0 {
                w.push_str(sep);
            }
            if inner.op.is_composite() {
                w.push('(');
                write_expr(w, inner)?;
                w.push(')');
            } else {
                write_expr(w, inner)?;
            }
        }
        return Ok(());
    }

    match f.op.mnemonic() {
        Some(op) => write!(w, "{} {} {}", quote_key(&f.key), op, quote_value(&f.value)),
        None => write!(w, "@{}", f.name),
    }
}

fn is_plain_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !is_reserved(s)
}

fn is_number_literal(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) && (s == "0" || !s.starts_with('0'))
}

fn quote(s: &str) -> String {
    if s.contains('\'') {
        format!("\"{}\"", s)
    } else {
        format!("'{}'", s)
    }
}

fn quote_key(s: &str) -> String {
    if is_plain_ident(s) {
        s.to_owned()
    } else {
        quote(s)
    }
}

fn quote_value(s: &str) -> String {
    if is_plain_ident(s) || is_number_literal(s) {
        s.to_owned()
    } else {
        quote(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_every_statement_kind() {
        let src = "REP 1 IN X\nREP 2\nCBF 3\nSELECT 2 IN DISTINCT City FROM F AS X\nSELECT 1 FROM *\nFILTER Country EQ 'Germany and co' AND Rating GE 4 AS F";
        let p = parse(src).unwrap();
        assert_eq!(
            format_policy(&p),
            "REP 1 IN X\nREP 2\nCBF 3\nSELECT 2 IN DISTINCT City FROM F AS X\nSELECT 1 FROM *\nFILTER Country EQ 'Germany and co' AND Rating GE 4 AS F"
        );
    }

    #[test]
    fn composite_children_are_parenthesized() {
        let p = parse("FILTER A EQ 1 AND B EQ 2 OR C EQ 3 AS F").unwrap();
        assert_eq!(p.to_string(), "FILTER (A EQ 1 AND B EQ 2) OR C EQ 3 AS F");
    }

    #[test]
    fn reserved_and_odd_values_are_quoted() {
        let p = parse("FILTER K EQ 'AND' OR K EQ \"it's\" OR K EQ '007' OR @Other AS F FILTER X EQ 1 AS Other").unwrap();
        assert_eq!(
            format_policy(&p),
            "FILTER K EQ 'AND' OR K EQ \"it's\" OR K EQ '007' OR @Other AS F\nFILTER X EQ 1 AS Other"
        );
    }

    #[test]
    fn text_round_trip() {
        for src in [
            "REP 3\nSELECT 1 IN City FROM F\nFILTER A EQ 1 AS F",
            "REP 1 IN S CBF 2 SELECT 1 IN SAME Loc FROM * AS S",
            "FILTER A EQ 1 AND (B EQ 2 AND C EQ 3) AS F",
            "FILTER (A EQ 1 OR B EQ 2) AND (C EQ 3 OR @G) AS F FILTER 'key x' LE 10 AS G",
        ] {
            let p = parse(src).unwrap();
            let again = parse(&format_policy(&p)).unwrap();
            assert_eq!(again, p, "round trip of {:?}", src);
        }
    }

    #[test]
    fn format_policy_matches_display() {
        let p = parse("REP 2 IN S\nSELECT 2 IN SAME Rack FROM F AS S\nFILTER A GT 1 OR @G AS F\nFILTER B LT 9 AS G").unwrap();
        assert_eq!(format_policy(&p), format!("{}", p));
        assert_eq!(
            format_policy(&p),
            "REP 2 IN S\nSELECT 2 IN SAME Rack FROM F AS S\nFILTER A GT 1 OR @G AS F\nFILTER B LT 9 AS G"
        );
    }

    #[test]
    fn empty_policy_formats_to_empty_text() {
        assert_eq!(format_policy(&PlacementPolicy::default()), "");
    }
}
