//! Mapping repository implementations.
//!
//! Concrete implementations of the domain storage contract:
//!
//! - [`PgMappingRepository`] - PostgreSQL-backed, for production deployments
//! - [`MemoryMappingRepository`] - process-local, for database-less runs and
//!   tests

pub mod memory_mapping_repository;
pub mod pg_mapping_repository;

pub use memory_mapping_repository::MemoryMappingRepository;
pub use pg_mapping_repository::PgMappingRepository;
