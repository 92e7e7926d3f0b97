//! Testing utilities for value trees
//!
//! Comparing whole trees with `assert_eq!` works for small documents but gives unreadable
//! failures for big ones, and forces every test to spell out parts it does not care about.
//! [`assert_value`] walks a tree with a fluent API instead, and every failure message says
//! where in the tree it happened (`$.list[1].deep`).
//!
//! ```rust-example
//! use json_build::json::testing::assert_value;
//!
//! let value = json_build::parse(r#"{"list": [1, {"deep": true}]}"#)?;
//!
//! assert_value(&value).object_len(1).member("list", |list| {
//!     list.array_len(2).element(1, |second| {
//!         second.member("deep", |deep| {
//!             deep.boolean(true);
//!         });
//!     });
//! });
//! ```

mod value_assertions;

pub use value_assertions::{assert_value, ValueAssertion};
