//! Build contexts and the stack that holds them
//!
//! One context is open for every string, array or object the grammar is currently inside.
//! Only the top of the stack receives notifications. Values finished while a context is
//! on top land in its pending slot first and are committed into the container when the
//! grammar reports a separator or the container closes:
//!
//! ```text
//! [ 1 , 2 ]
//!   |  |  `- close: pending 2 is appended, array is finished
//!   |  `---- separator: pending 1 is appended
//!   `------- value 1 becomes pending
//! ```
//!
//! Objects work the same way, with the member key parked next to the pending value.

use std::collections::BTreeMap;

use crate::json::error::invariant_violation;
use crate::json::value::Value;

/// Which composite a context builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    String,
    Array,
    Object,
}

/// How a finished value is handed to the context below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delivery {
    /// As a child value: a pending element or member value, or the document root.
    Value,
    /// As the key of the member being built. Only objects accept keys.
    Key,
}

/// Decoded text of a string literal.
#[derive(Debug, Default)]
pub struct StringContext {
    buffer: String,
}

impl StringContext {
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

/// Committed elements of an array.
#[derive(Debug, Default)]
pub struct ArrayContext {
    elements: Vec<Value>,
}

/// Committed members of an object, plus the key of the member being built.
#[derive(Debug, Default)]
pub struct ObjectContext {
    members: BTreeMap<String, Value>,
    pending_key: Option<String>,
}

impl ObjectContext {
    fn insert(&mut self, value: Value) {
        let key = self
            .pending_key
            .take()
            .unwrap_or_else(|| invariant_violation("object member value without a key"));
        // last write wins for repeated keys
        self.members.insert(key, value);
    }
}

/// The partial state of one open composite.
#[derive(Debug)]
pub enum BuildContext {
    String(StringContext),
    Array(ArrayContext),
    Object(ObjectContext),
}

impl BuildContext {
    pub fn new(kind: ContextKind) -> Self {
        match kind {
            ContextKind::String => BuildContext::String(StringContext::default()),
            ContextKind::Array => BuildContext::Array(ArrayContext::default()),
            ContextKind::Object => BuildContext::Object(ObjectContext::default()),
        }
    }

    pub fn kind(&self) -> ContextKind {
        match self {
            BuildContext::String(_) => ContextKind::String,
            BuildContext::Array(_) => ContextKind::Array,
            BuildContext::Object(_) => ContextKind::Object,
        }
    }
}

/// A context on the stack together with the child value waiting to be committed.
#[derive(Debug)]
pub struct Frame {
    context: BuildContext,
    pending: Option<Value>,
}

impl Frame {
    fn new(kind: ContextKind) -> Self {
        Self {
            context: BuildContext::new(kind),
            pending: None,
        }
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    pub fn kind(&self) -> ContextKind {
        self.context.kind()
    }

    pub fn pending(&self) -> Option<&Value> {
        self.pending.as_ref()
    }

    /// The string being decoded. Only valid while a string context is on top.
    pub fn string_mut(&mut self) -> &mut StringContext {
        match &mut self.context {
            BuildContext::String(string) => string,
            other => invariant_violation(format!(
                "string fragment delivered to {:?} context",
                other.kind()
            )),
        }
    }

    fn receive(&mut self, value: Value, delivery: Delivery) {
        match (delivery, &mut self.context) {
            (Delivery::Key, BuildContext::Object(object)) => {
                if object.pending_key.is_some() || self.pending.is_some() {
                    invariant_violation("object key delivered before previous member was committed");
                }
                match value {
                    Value::String(key) => object.pending_key = Some(key),
                    other => invariant_violation(format!("object key is a {}", other.kind())),
                }
            }
            (Delivery::Key, other) => {
                invariant_violation(format!("key delivered to {:?} context", other.kind()))
            }
            (Delivery::Value, BuildContext::String(_)) => {
                invariant_violation("value delivered to string context")
            }
            (Delivery::Value, BuildContext::Object(object)) if object.pending_key.is_none() => {
                invariant_violation("object member value without a key")
            }
            (Delivery::Value, _) => {
                if self.pending.is_some() {
                    invariant_violation("value delivered before previous one was committed");
                }
                self.pending = Some(value);
            }
        }
    }

    /// Move the pending child into the container. Called when a separator matched.
    pub fn commit(&mut self) {
        let value = self
            .pending
            .take()
            .unwrap_or_else(|| invariant_violation("separator with nothing to commit"));
        match &mut self.context {
            BuildContext::Array(array) => array.elements.push(value),
            BuildContext::Object(object) => object.insert(value),
            BuildContext::String(_) => invariant_violation("separator inside string context"),
        }
    }

    /// Turn the context into its value, committing a trailing pending child.
    fn finish(mut self) -> Value {
        if self.pending.is_some() {
            self.commit();
        }
        match self.context {
            BuildContext::String(string) => Value::String(string.buffer),
            BuildContext::Array(array) => Value::Array(array.elements),
            BuildContext::Object(object) => {
                if object.pending_key.is_some() {
                    invariant_violation("object closed with a key but no value");
                }
                Value::Object(object.members)
            }
        }
    }
}

/// The open contexts, innermost last, and the slot the document root ends up in.
#[derive(Debug, Default)]
pub struct ContextStack {
    frames: Vec<Frame>,
    result: Option<Value>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Open a context of `kind` on top of the stack.
    pub fn push(&mut self, kind: ContextKind) {
        self.frames.push(Frame::new(kind));
        log::trace!("push {:?} context (depth {})", kind, self.frames.len());
    }

    /// Finish the top context and hand its value to the context below, or to the result
    /// slot if it was the last one.
    pub fn pop_success(&mut self, delivery: Delivery) {
        let frame = self
            .frames
            .pop()
            .unwrap_or_else(|| invariant_violation("pop_success on empty context stack"));
        log::trace!(
            "pop {:?} context as {:?} (depth {})",
            frame.kind(),
            delivery,
            self.frames.len()
        );
        let value = frame.finish();
        self.deliver(value, delivery);
    }

    /// Drop the top context and everything it collected.
    pub fn pop_failure(&mut self) {
        let frame = self
            .frames
            .pop()
            .unwrap_or_else(|| invariant_violation("pop_failure on empty context stack"));
        log::trace!(
            "discard {:?} context (depth {})",
            frame.kind(),
            self.frames.len()
        );
    }

    pub fn current(&self) -> &Frame {
        self.frames
            .last()
            .unwrap_or_else(|| invariant_violation("no open context"))
    }

    pub fn current_mut(&mut self) -> &mut Frame {
        self.frames
            .last_mut()
            .unwrap_or_else(|| invariant_violation("no open context"))
    }

    /// Hand a finished value to the top context, or store it as the result when no context
    /// is open.
    pub fn deliver(&mut self, value: Value, delivery: Delivery) {
        match self.frames.last_mut() {
            Some(frame) => frame.receive(value, delivery),
            None => {
                if delivery == Delivery::Key {
                    invariant_violation("key delivered outside any object");
                }
                if self.result.is_some() {
                    invariant_violation("document produced a second root value");
                }
                self.result = Some(value);
            }
        }
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }
}
