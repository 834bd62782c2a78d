//! # Activities API
//!
//! > **A CRUD web service for Activity records, routed through a mediator.**
//!
//! Every HTTP request becomes one message (a query or a command), the
//! [`Mediator`](framework::Mediator) hands it to exactly one handler, and the
//! handler reads or writes through the [`DataContext`](persistence::DataContext).
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a Mediator?
//!
//! The controller never touches the store. It only knows how to build a
//! message and how to turn the reply into a response:
//! - **Decoupling**: Handlers can change without touching routing.
//! - **Testability**: The controller is tested against [`MockMediator`](framework::mock::MockMediator),
//!   handlers against [`MemoryContext`](persistence::MemoryContext).
//! - **Type Safety**: Messages form a closed enum, so every message has exactly
//!   one handler and the compiler checks it.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Explicit Application Context
//! There are no globals. [`ActivitySystem`](lifecycle::ActivitySystem) builds the
//! mediator, injects the persistence context into it, and hands the
//! [`MediatorClient`](framework::MediatorClient) to the router as axum state.
//!
//! ### 2. Concurrency Model
//! One Tokio task per HTTP request and one per dispatched message. The only
//! shared state is the store, whose own transaction handling decides races.
//!
//! ### 3. Errors
//! Each layer has its own `thiserror` enum: [`StoreError`](persistence::StoreError),
//! [`ActivityError`](handlers::ActivityError), [`DispatchError`](framework::DispatchError)
//! and [`ApiError`](api::ApiError), which maps to 404 / 409 / 400 / 500.
//!
//! ## 🗺️ Module Tour
//!
//! - [`domain`] - The `Activity` record and its request payloads.
//! - [`persistence`] - SQLite and in-memory stores, migrations, seed data.
//! - [`handlers`] - List, Details, Create, Edit, Delete.
//! - [`framework`] - The mediator and its mock.
//! - [`api`] - The `/api/activities` controller, CORS, OpenAPI document.
//! - [`lifecycle`] - Configuration, tracing and bootstrap.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Development mode exposes /swagger/v1/swagger.json
//! APP_ENV=Development RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod api;
pub mod domain;
pub mod framework;
pub mod handlers;
pub mod lifecycle;
pub mod persistence;
