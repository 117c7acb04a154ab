//! # Lexer for field directory rows
//!
//! Rows look like `"rd",11,7`; names may also appear unquoted.

use logos::Logos;
use std::fmt;

/// Tokens of an `arg_lut.csv`-style field directory
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")] // Skip whitespace (not newlines)
#[logos(skip r"#[^\n]*")] // Skip comments
pub enum Token {
    /// Double-quoted field name
    #[regex(r#""[^"\n]*""#, |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    Quoted(String),

    /// Bare field name
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Decimal bit index, kept as written so oversized values can be reported
    #[regex(r"-?[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    /// Column separator
    #[token(",")]
    Comma,

    /// Row separator
    #[regex(r"\n")]
    Newline,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Quoted(s) => write!(f, "\"{}\"", s),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Number(n) => f.write_str(n),
            Token::Comma => write!(f, ","),
            Token::Newline => write!(f, "newline"),
        }
    }
}
