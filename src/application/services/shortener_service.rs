//! Short code resolution service.

use std::sync::Arc;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use serde_json::json;
use tracing::debug;

/// Result of shortening a URL.
#[derive(Debug, Clone)]
pub struct ShortenedUrl {
    pub code: String,
    pub short_url: String,
}

/// Service that maps URLs to unique short codes and back.
///
/// Codes are derived deterministically from the URL, so shortening is
/// idempotent: re-submitting a URL returns its existing mapping. When a
/// derived code is already held by a *different* URL, the requested code
/// length grows by one character per attempt, up to a configured ceiling.
pub struct ShortenerService {
    repository: Arc<dyn MappingRepository>,
    initial_code_length: usize,
    max_code_length_increase: usize,
    base_short_url: String,
}

impl ShortenerService {
    /// Creates a new shortener service.
    ///
    /// `initial_code_length` must be at least 1 and `base_short_url` is
    /// prepended verbatim to codes; both are validated at configuration load.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        initial_code_length: usize,
        max_code_length_increase: usize,
        base_short_url: String,
    ) -> Self {
        Self {
            repository,
            initial_code_length,
            max_code_length_increase,
            base_short_url,
        }
    }

    /// Finds or creates the short code for a URL.
    ///
    /// # Algorithm
    ///
    /// Starting at the configured initial length, derive a code and consult
    /// storage:
    ///
    /// - unmapped code: persist the mapping and return it
    /// - mapped to the same URL: return the existing mapping, no write
    /// - mapped to a different URL: escalate the length and retry
    ///
    /// A lost insert race (another writer claimed the code between lookup and
    /// save) re-enters the loop at the same length; the re-read then settles
    /// it as reuse or collision. A failed save is never reported as success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CollisionExhausted`] once the length has grown by
    /// `max_code_length_increase` without finding a free or matching code.
    /// Storage failures propagate unchanged.
    pub async fn shorten_url(&self, long_url: &str) -> Result<ShortenedUrl, AppError> {
        let mut length = self.initial_code_length;

        loop {
            let code = generate_code(long_url, length)?;

            match self.repository.find_by_code(&code).await? {
                None => {
                    let new_mapping = NewMapping {
                        code: code.clone(),
                        long_url: long_url.to_string(),
                    };

                    match self.repository.create(new_mapping).await {
                        Ok(mapping) => return Ok(self.shortened(mapping.code)),
                        Err(AppError::Conflict { .. }) => {
                            debug!(%code, "lost insert race, re-reading");
                            continue;
                        }
                        Err(e) => return Err(e),
                    }
                }
                Some(existing) if existing.long_url == long_url => {
                    return Ok(self.shortened(existing.code));
                }
                Some(_) => {
                    if length - self.initial_code_length >= self.max_code_length_increase {
                        return Err(AppError::collision_exhausted(
                            "Failed to generate a unique short code",
                            json!({
                                "initial_length": self.initial_code_length,
                                "max_increase": self.max_code_length_increase,
                                "final_length": length,
                            }),
                        ));
                    }

                    debug!(%code, length, "code collision, escalating length");
                    length += 1;
                }
            }
        }
    }

    /// Resolves a short code back to its stored mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is not mapped.
    /// Storage failures propagate unchanged.
    pub async fn resolve_code(&self, code: &str) -> Result<Mapping, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Reports whether the backing store is reachable.
    pub async fn storage_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    fn shortened(&self, code: String) -> ShortenedUrl {
        let short_url = format!("{}{}", self.base_short_url, code);
        ShortenedUrl { code, short_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use chrono::Utc;
    use mockall::Sequence;

    const BASE: &str = "https://sh.test/";
    const URL: &str = "https://example.com/some/long/path";

    fn service(repo: MockMappingRepository, max_increase: usize) -> ShortenerService {
        ShortenerService::new(Arc::new(repo), 8, max_increase, BASE.to_string())
    }

    fn mapping_for(code: &str, url: &str) -> Mapping {
        Mapping::new(code.to_string(), url.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_shorten_creates_new_mapping() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        repo.expect_create()
            .withf(|m| m.code.len() == 8 && m.long_url == URL)
            .times(1)
            .returning(|m| Ok(mapping_for(&m.code, &m.long_url)));

        let result = service(repo, 8).shorten_url(URL).await.unwrap();

        let expected = generate_code(URL, 8).unwrap();
        assert_eq!(result.code, expected);
        assert_eq!(result.short_url, format!("{BASE}{expected}"));
    }

    #[tokio::test]
    async fn test_shorten_is_idempotent() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(mapping_for(code, URL))));

        repo.expect_create().times(0);

        let result = service(repo, 8).shorten_url(URL).await.unwrap();
        assert_eq!(result.code, generate_code(URL, 8).unwrap());
    }

    #[tokio::test]
    async fn test_shorten_escalates_on_collision() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_code()
            .withf(|code| code.len() == 8)
            .times(1)
            .returning(|code| Ok(Some(mapping_for(code, "https://other.example"))));

        repo.expect_find_by_code()
            .withf(|code| code.len() == 9)
            .times(1)
            .returning(|_| Ok(None));

        repo.expect_create()
            .withf(|m| m.code.len() == 9)
            .times(1)
            .returning(|m| Ok(mapping_for(&m.code, &m.long_url)));

        let result = service(repo, 8).shorten_url(URL).await.unwrap();
        assert_eq!(result.code.len(), 9);
        assert_eq!(result.code, generate_code(URL, 9).unwrap());
    }

    #[tokio::test]
    async fn test_shorten_exhausts_after_max_increase() {
        let mut repo = MockMappingRepository::new();

        // Lengths 8, 9 and 10 are all taken by different URLs.
        repo.expect_find_by_code()
            .times(3)
            .returning(|code| Ok(Some(mapping_for(code, "https://other.example"))));

        repo.expect_create().times(0);

        let err = service(repo, 2).shorten_url(URL).await.unwrap_err();
        assert!(matches!(err, AppError::CollisionExhausted { .. }));
    }

    #[tokio::test]
    async fn test_shorten_exhausts_immediately_with_zero_increase() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(mapping_for(code, "https://other.example"))));

        let err = service(repo, 0).shorten_url(URL).await.unwrap_err();
        assert!(matches!(err, AppError::CollisionExhausted { .. }));
    }

    #[tokio::test]
    async fn test_shorten_rereads_after_lost_insert_race() {
        let mut repo = MockMappingRepository::new();
        let mut seq = Sequence::new();

        repo.expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        // A concurrent writer claimed the code with the same URL.
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(AppError::conflict(
                    "Unique constraint violation",
                    serde_json::json!({}),
                ))
            });

        repo.expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|code| Ok(Some(mapping_for(code, URL))));

        let result = service(repo, 8).shorten_url(URL).await.unwrap();
        assert_eq!(result.code, generate_code(URL, 8).unwrap());
    }

    #[tokio::test]
    async fn test_shorten_propagates_storage_errors() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_code().times(1).returning(|_| {
            Err(AppError::storage(
                "Database error",
                serde_json::json!({}),
            ))
        });

        let err = service(repo, 8).shorten_url(URL).await.unwrap_err();
        assert!(matches!(err, AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_resolve_code_found() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_code()
            .withf(|code| code == "Abc123Xy")
            .times(1)
            .returning(|code| Ok(Some(mapping_for(code, URL))));

        let mapping = service(repo, 8).resolve_code("Abc123Xy").await.unwrap();
        assert_eq!(mapping.long_url, URL);
    }

    #[tokio::test]
    async fn test_resolve_code_not_found() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let err = service(repo, 8).resolve_code("missing1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
