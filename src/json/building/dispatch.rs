//! Rule dispatch table
//!
//! Maps each grammar rule to the one thing the builder does about it. The table is built
//! once per process and only ever read; rules it does not list carry no semantic action.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::context::{ContextKind, Delivery};
use crate::json::grammar::Rule;

/// A scalar produced directly by a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Null,
    True,
    False,
}

/// What the builder does for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Push a context on enter; on success pop it and deliver its value as given.
    Open(ContextKind, Delivery),
    /// Deliver a keyword value on success.
    Literal(Literal),
    /// Convert the matched text to a number on success.
    Number,
    /// Commit the pending child of the current container on success.
    Commit,
    /// Append the matched text to the current string on success.
    Append,
    /// Decode the matched escape and append it to the current string on success.
    Unescape,
    NoOp,
}

static RULE_TABLE: Lazy<HashMap<Rule, Handler>> = Lazy::new(|| {
    HashMap::from([
        (
            Rule::String,
            Handler::Open(ContextKind::String, Delivery::Value),
        ),
        (Rule::Key, Handler::Open(ContextKind::String, Delivery::Key)),
        (
            Rule::Array,
            Handler::Open(ContextKind::Array, Delivery::Value),
        ),
        (
            Rule::Object,
            Handler::Open(ContextKind::Object, Delivery::Value),
        ),
        (Rule::Null, Handler::Literal(Literal::Null)),
        (Rule::True, Handler::Literal(Literal::True)),
        (Rule::False, Handler::Literal(Literal::False)),
        (Rule::Number, Handler::Number),
        (Rule::ValueSeparator, Handler::Commit),
        (Rule::Unescaped, Handler::Append),
        (Rule::EscapedChar, Handler::Unescape),
        (Rule::Unicode, Handler::Unescape),
    ])
});

/// Look up the handler for `rule`.
pub fn handler(rule: Rule) -> Handler {
    RULE_TABLE.get(&rule).copied().unwrap_or(Handler::NoOp)
}
