//! JSON parsing
//!
//! This module wires the pieces of the parse together:
//!
//! 1. The grammar engine ([`grammar`]) walks the input top-down and reports every rule it
//!    enters, matches or abandons through the [`Control`](grammar::Control) trait.
//! 2. The [`Builder`](building::Builder) receives those notifications, keeps one build
//!    context per open string/array/object, and folds finished values into their parent.
//! 3. Once the top-level rule matched, the builder hands back the root [`Value`].
//!
//! Nothing in here touches files or global mutable state: every call to [`parse`] owns its
//! own builder, so independent inputs can be parsed from as many threads as needed.

pub mod building;
pub mod config;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod testing;
pub mod unescape;
pub mod value;

pub use building::Builder;
pub use config::ParseOptions;
pub use error::{ParseError, Position};
pub use value::{Value, ValueKind};

/// Parse a JSON document with the default [`ParseOptions`].
pub fn parse(input: &str) -> Result<Value, ParseError> {
    parse_with(input, &ParseOptions::default())
}

/// Parse a JSON document.
///
/// The result is either the complete root value or an error; a failed parse never exposes
/// a partially built tree.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Value, ParseError> {
    let mut builder = Builder::new();
    match grammar::drive(input, &mut builder, options) {
        Ok(()) => {
            let value = builder.finish();
            log::debug!("parsed {} bytes into {}", input.len(), value.kind());
            Ok(value)
        }
        Err(err) => {
            log::debug!("parse failed: {}", err);
            Err(err)
        }
    }
}
