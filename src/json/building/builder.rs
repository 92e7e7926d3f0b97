//! The value builder
//!
//! [`Builder`] is the [`Control`] the grammar engine reports to during [`parse`]. It looks
//! up each rule in the dispatch table and applies the handler to its context stack.
//!
//! [`parse`]: crate::json::parse

use super::context::{ContextStack, Delivery};
use super::dispatch::{handler, Handler, Literal};
use crate::json::error::{invariant_violation, ParseError};
use crate::json::grammar::{Control, Rule};
use crate::json::unescape::unescape_into;
use crate::json::value::Value;

/// Builds one document from the notifications of one parse attempt.
#[derive(Debug, Default)]
pub struct Builder {
    stack: ContextStack,
    /// Offset of the most recently entered rule. Leaf rules have no children, so on their
    /// success this is where their text starts.
    last_enter: usize,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contexts currently open.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn stack(&self) -> &ContextStack {
        &self.stack
    }

    /// Take the finished document.
    ///
    /// Panics if a context is still open or no value was produced: after the top-level
    /// rule succeeded, either means the grammar and the dispatch table disagree.
    pub fn finish(mut self) -> Value {
        if !self.stack.is_empty() {
            invariant_violation(format!(
                "{} context(s) still open after the document matched",
                self.stack.depth()
            ));
        }
        self.stack
            .take_result()
            .unwrap_or_else(|| invariant_violation("document matched but produced no value"))
    }

    fn deliver(&mut self, value: Value) {
        self.stack.deliver(value, Delivery::Value);
    }
}

impl Control for Builder {
    fn enter(&mut self, rule: Rule, position: usize) {
        self.last_enter = position;
        if let Handler::Open(kind, _) = handler(rule) {
            self.stack.push(kind);
        }
    }

    fn success(&mut self, rule: Rule, matched: &str) -> Result<(), ParseError> {
        match handler(rule) {
            Handler::Open(_, delivery) => self.stack.pop_success(delivery),
            Handler::Literal(Literal::Null) => self.deliver(Value::Null),
            Handler::Literal(Literal::True) => self.deliver(Value::Boolean(true)),
            Handler::Literal(Literal::False) => self.deliver(Value::Boolean(false)),
            Handler::Number => {
                let number = parse_number(matched).ok_or_else(|| ParseError::NumberFormat {
                    literal: matched.to_string(),
                    offset: self.last_enter,
                })?;
                self.deliver(Value::Number(number));
            }
            Handler::Commit => self.stack.current_mut().commit(),
            Handler::Append => self.stack.current_mut().string_mut().push_str(matched),
            Handler::Unescape => {
                let buffer = self.stack.current_mut().string_mut().buffer_mut();
                unescape_into(matched, buffer).map_err(|source| ParseError::EscapeDecode {
                    fragment: matched.to_string(),
                    offset: self.last_enter,
                    source,
                })?;
            }
            Handler::NoOp => {}
        }
        Ok(())
    }

    fn failure(&mut self, rule: Rule) {
        if let Handler::Open(..) = handler(rule) {
            self.stack.pop_failure();
        }
    }
}

/// Convert a matched number literal. Values too large for an `f64` are rejected rather
/// than saturated to infinity; values too small round towards zero.
fn parse_number(literal: &str) -> Option<f64> {
    literal.parse::<f64>().ok().filter(|n| n.is_finite())
}
