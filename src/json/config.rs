//! Parser configuration
//!
//! Options are plain data so they can be built in code or deserialized from a settings
//! file; every field has a default, and a file only needs to name what it changes.

use serde::{Deserialize, Serialize};

/// Nesting limit applied when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for a single parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest allowed nesting of arrays and objects. `None` disables the limit, which
    /// lets adversarial input exhaust the stack.
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
