//! Family-tree domain model.
//!
//! # Responsibility
//! - Define persons, marriages, notes and the graph that owns them.
//! - Keep every bidirectional relationship consistent under mutation.
//! - Fan out change notifications to registered listeners.
//!
//! # Invariants
//! - A relationship recorded on one entity is always mirrored on its
//!   counterpart after any public mutator returns, including rejected ones.
//! - Mutators return `false` and fire nothing when they change nothing.
//! - Listeners are called after internal borrows are released.

pub mod connection;
pub mod element;
pub mod graph;
pub mod listener;
pub mod marriage;
pub mod note;
pub mod person;
