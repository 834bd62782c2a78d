//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for bringing the service up and down:
//!
//! - **Configuration**: [`Settings`] from the environment
//! - **Observability setup**: [`setup_tracing`]
//! - **Bootstrap**: [`ActivitySystem`] wires the mediator to the persistence context,
//!   migrates and seeds, and shuts the mediator down

pub mod activity_system;
pub mod config;
pub mod tracing;

pub use activity_system::*;
pub use config::*;
pub use self::tracing::*;
