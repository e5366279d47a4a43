//! Mapping entity representing a short code to URL association.

use chrono::{DateTime, Utc};

/// A persisted short code to long URL mapping.
///
/// Created once per distinct URL and never mutated afterwards; deletion is
/// not part of the data model.
#[derive(Debug, Clone)]
pub struct Mapping {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            long_url,
            created_at,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone)]
pub struct NewMapping {
    pub code: String,
    pub long_url: String,
}
