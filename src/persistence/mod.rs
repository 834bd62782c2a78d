//! Persistence context: the store trait, its implementations, and seeding.
//!
//! - [`DataContext`] - the contract every handler depends on
//! - [`SqliteContext`] - `sqlx` pool with embedded migrations
//! - [`MemoryContext`] - `HashMap` store for tests
//! - [`seed_data`] - idempotent demonstration data

pub mod context;
pub mod error;
pub mod memory;
pub mod seed;
pub mod sqlite;

pub use context::DataContext;
pub use error::StoreError;
pub use memory::MemoryContext;
pub use seed::{seed_activities, seed_data};
pub use sqlite::SqliteContext;
