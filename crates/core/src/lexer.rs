use crate::error::PolicyError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifiers and keywords, told apart by the parser
    Word(String),
    /// Quoted string literal (content between the quotes, verbatim)
    Str(String),
    /// Decimal digit run, kept as text so range checks happen where the
    /// number is used
    Number(String),
    LParen,
    RParen,
    At,
    Star,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
    pub column: u32,
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, PolicyError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;
    let mut line: u32 = 1;
    let mut line_start = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
                line_start = pos + 1;
            }
            pos += 1;
            continue;
        }

        let tok_line = line;
        let tok_column = (pos - line_start) as u32 + 1;

        // String literal, either quote style. A backslash keeps the next
        // character from closing the literal; nothing is unescaped.
        if c == '"' || c == '\'' {
            let quote = c;
            pos += 1;
            let mut s = String::new();
            loop {
                if pos >= chars.len() {
                    return Err(PolicyError::syntax(
                        tok_line,
                        tok_column,
                        "unterminated string literal",
                    ));
                }
                let sc = chars[pos];
                if sc == quote {
                    pos += 1;
                    break;
                }
                if sc == '\\' && pos + 1 < chars.len() {
                    s.push(sc);
                    pos += 1;
                }
                if chars[pos] == '\n' {
                    line += 1;
                    line_start = pos + 1;
                }
                s.push(chars[pos]);
                pos += 1;
            }
            tokens.push(Spanned {
                token: Token::Str(s),
                line: tok_line,
                column: tok_column,
            });
            continue;
        }

        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            let s: String = chars[start..pos].iter().collect();
            if s.len() > 1 && s.starts_with('0') {
                return Err(PolicyError::syntax(
                    tok_line,
                    tok_column,
                    format!("invalid number literal '{}': leading zero", s),
                ));
            }
            tokens.push(Spanned {
                token: Token::Number(s),
                line: tok_line,
                column: tok_column,
            });
            continue;
        }

        let punct = match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '@' => Some(Token::At),
            '*' => Some(Token::Star),
            _ => None,
        };
        if let Some(token) = punct {
            tokens.push(Spanned {
                token,
                line: tok_line,
                column: tok_column,
            });
            pos += 1;
            continue;
        }

        // Identifier / keyword
        if c.is_ascii_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            tokens.push(Spanned {
                token: Token::Word(word),
                line: tok_line,
                column: tok_column,
            });
            continue;
        }

        return Err(PolicyError::syntax(
            tok_line,
            tok_column,
            format!("unexpected character '{}'", c),
        ));
    }

    tokens.push(Spanned {
        token: Token::Eof,
        line,
        column: (pos - line_start) as u32 + 1,
    });
    Ok(tokens)
}
