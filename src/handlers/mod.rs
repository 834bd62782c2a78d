//! Message handlers, one module per message type.
//!
//! Each module defines its message (`Query` or `Command`) and an async `handle`
//! function of `(message, &dyn DataContext)`. Handlers hold no state of their
//! own; the [`Mediator`](crate::framework::Mediator) routes each message to
//! exactly one of them.

pub mod create;
pub mod delete;
pub mod details;
pub mod edit;
pub mod error;
pub mod list;

pub use error::*;
