//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation input
//! is split into a separate `New*` struct, so persisted fields the store owns
//! (timestamps) never appear on the write path.

pub mod mapping;

pub use mapping::{Mapping, NewMapping};
