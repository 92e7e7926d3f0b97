//! # json-build
//!
//! Turns a JSON document into a typed [`Value`](json::Value) tree by listening to the
//! rule notifications of a grammar engine and folding them through a stack of build
//! contexts.
//!
//! ## Testing
//!
//! Tree-shaped expectations are written with the fluent API in the
//! [testing module](json::testing).

pub mod json;

pub use json::{parse, parse_with, ParseError, ParseOptions, Value};
