//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Mapping store backed by a process-local map.
///
/// Selected at startup when no database is configured, and used by handler
/// tests. Mappings do not survive a restart. Insert-if-absent semantics
/// match the PostgreSQL adapter: a duplicate code fails with
/// [`AppError::Conflict`].
pub struct MemoryMappingRepository {
    mappings: RwLock<HashMap<String, Mapping>>,
}

impl MemoryMappingRepository {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        debug!("Using in-memory mapping store");
        Self {
            mappings: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryMappingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn create(&self, mapping: NewMapping) -> Result<Mapping, AppError> {
        let mut mappings = self.mappings.write().await;

        if mappings.contains_key(&mapping.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "code": mapping.code }),
            ));
        }

        let stored = Mapping::new(mapping.code.clone(), mapping.long_url, Utc::now());
        mappings.insert(mapping.code, stored.clone());

        Ok(stored)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, AppError> {
        let mappings = self.mappings.read().await;
        Ok(mappings.get(code).cloned())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
