//! Pure data structures carried through the mediator and persisted by the [`DataContext`](crate::persistence::DataContext).

pub mod activity;

pub use activity::*;
