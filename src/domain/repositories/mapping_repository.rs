//! Repository trait for short code mapping storage.

use crate::domain::entities::{Mapping, NewMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for code to URL mappings.
///
/// The shortener service only reads mappings and requests creation; the
/// implementation owns the mapping lifecycle. Uniqueness of a single code is
/// enforced here (one code, one URL per store), while collision resolution
/// across codes is the service's responsibility.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryMappingRepository`] - in-memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists a new mapping as an atomic insert-if-absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already mapped - the
    /// caller decides whether that means idempotent reuse or a collision.
    ///
    /// Returns [`AppError::Storage`] on backing-store failure. A failed save
    /// leaves no partial state behind.
    async fn create(&self, mapping: NewMapping) -> Result<Mapping, AppError>;

    /// Finds a mapping by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Mapping))` if the code is mapped
    /// - `Ok(None)` if not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backing-store failure; absence is
    /// never synthesized from a failure.
    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, AppError>;

    /// Reports whether the backing store is reachable.
    async fn health_check(&self) -> bool;
}
