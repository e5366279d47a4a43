#![allow(dead_code)]

use std::sync::Arc;

use shorthash::application::services::ShortenerService;
use shorthash::domain::entities::NewMapping;
use shorthash::domain::repositories::MappingRepository;
use shorthash::infrastructure::persistence::MemoryMappingRepository;
use shorthash::state::AppState;

pub const BASE_SHORT_URL: &str = "https://sh.test/";

/// Builds an application state over a fresh in-memory store with the default
/// code length settings (initial 8, max increase 8).
///
/// The store handle is returned alongside the state so tests can seed and
/// inspect mappings directly.
pub fn create_test_state() -> (AppState, Arc<MemoryMappingRepository>) {
    create_test_state_with(8, 8)
}

/// Builds an application state with explicit code length settings.
pub fn create_test_state_with(
    initial_code_length: usize,
    max_code_length_increase: usize,
) -> (AppState, Arc<MemoryMappingRepository>) {
    let repository = Arc::new(MemoryMappingRepository::new());

    let shortener_service = Arc::new(ShortenerService::new(
        repository.clone(),
        initial_code_length,
        max_code_length_increase,
        BASE_SHORT_URL.to_string(),
    ));

    (AppState { shortener_service }, repository)
}

/// Inserts a mapping directly into the store, bypassing the service.
pub async fn seed_mapping(repository: &MemoryMappingRepository, code: &str, url: &str) {
    repository
        .create(NewMapping {
            code: code.to_string(),
            long_url: url.to_string(),
        })
        .await
        .unwrap();
}
