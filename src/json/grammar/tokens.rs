//! Token definitions for the JSON grammar
//!
//! String bodies are split into fragments by a logos lexer; number literals are matched
//! with a single anchored regex implementing the RFC 8259 number grammar exactly.

use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;

/// The pieces a string body is made of, plus the closing quote that ends it.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    #[token("\"")]
    Quote,

    /// A run of characters that stand for themselves
    #[regex(r#"[^"\\\x00-\x1F]+"#)]
    Unescaped,

    /// `\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t`
    #[regex(r#"\\["\\/bfnrt]"#)]
    EscapedChar,

    /// One or more consecutive `\uXXXX` escapes, kept together so surrogate pairs stay whole
    #[regex(r"(\\u[0-9a-fA-F]{4})+")]
    Unicode,
}

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`, anchored at the start.
pub static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?").unwrap()
});

/// Length of the number literal at the start of `s`, if there is one.
pub fn number_len(s: &str) -> Option<usize> {
    NUMBER.find(s).map(|found| found.end())
}
