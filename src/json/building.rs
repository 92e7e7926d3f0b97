//! Building values from rule notifications
//!
//! - `context.rs`: build contexts and the stack holding them
//! - `dispatch.rs`: the rule to handler table
//! - `builder.rs`: the [`Control`](crate::json::grammar::Control) implementation tying
//!   the two together

pub mod builder;
pub mod context;
pub mod dispatch;

pub use builder::Builder;
pub use context::{BuildContext, ContextKind, ContextStack, Delivery};
pub use dispatch::{handler, Handler};
