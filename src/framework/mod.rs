//! Mediator between request senders and handlers.
//!
//! # Main Components
//!
//! - [`Message`] - Closed set of queries and commands, each with a reply channel
//! - [`Mediator`] - Dispatcher that runs each message's handler in its own task
//! - [`MediatorClient`] - Typed sender used by the HTTP layer
//! - [`DispatchError`] - Common error type for callers
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test callers without real handlers.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
