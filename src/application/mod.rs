//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository
//! calls and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! - [`services::shortener_service::ShortenerService`] - Code derivation,
//!   collision resolution, and lookup

pub mod services;
