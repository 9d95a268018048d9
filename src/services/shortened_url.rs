// src/services/shortened_url.rs - Business logic
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use url::Url;
use validator::Validate;

use crate::errors::{RepositoryError, ServiceError};
use crate::models::{
    CreateShortenedUrlDto, PublicUrlView, Resolution, ResponseFormat, ShortenResult, ShortenedUrl,
    UrlComponents,
};
use crate::repositories::ShortenedUrlRepositoryTrait;
use crate::utils::{hash::is_base62, HashGenerator, ShortIdGenerator};
use crate::validations::validate_url;

type Result<T> = std::result::Result<T, ServiceError>;

/// Generated hashes are checked against live records this many times before giving up
const MAX_HASH_ATTEMPTS: usize = 5;

pub const URL_NOT_FOUND: &str = "URL not found";
pub const URL_NOT_SAVED: &str = "Error. URL was not saved";
pub const URL_NOT_REMOVED: &str = "Error. URL was not removed";

#[async_trait]
pub trait ShortenedUrlServiceTrait: Send + Sync {
    /// Look up the active record for `hash`, count the visit and shape it per `format`
    async fn resolve(&self, hash: &str, format: ResponseFormat) -> Result<Resolution>;

    /// Validate, decompose and persist a new shortened URL
    async fn create(&self, dto: CreateShortenedUrlDto) -> Result<ShortenResult>;

    /// Deactivate the record matching both `hash` and `remove_token`.
    /// Returns how many records were affected; zero is not an error.
    async fn remove(&self, hash: &str, remove_token: &str) -> Result<u64>;
}

pub struct ShortenedUrlService<T: ShortenedUrlRepositoryTrait, G: HashGenerator = ShortIdGenerator> {
    repository: Arc<T>,
    generator: G,
    origin: String,
}

impl<T: ShortenedUrlRepositoryTrait, G: HashGenerator> ShortenedUrlService<T, G> {
    /// `origin` is the public `scheme://host` prefixed to every generated link
    pub fn new(repository: Arc<T>, generator: G, origin: impl Into<String>) -> Self {
        Self {
            repository,
            generator,
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    async fn unused_hash(&self, url: &str) -> Result<String> {
        for attempt in 1..=MAX_HASH_ATTEMPTS {
            let hash = self.generator.generate(url);
            let taken = self
                .repository
                .find_one_active(&hash)
                .await
                .map_err(|e| ServiceError::persistence(URL_NOT_SAVED, e))?
                .is_some();
            if !taken {
                return Ok(hash);
            }
            debug!("Hash '{}' already in use (attempt {})", hash, attempt);
        }

        Err(ServiceError::persistence(
            URL_NOT_SAVED,
            RepositoryError::Conflict(format!(
                "Failed to generate an unused hash after {} attempts",
                MAX_HASH_ATTEMPTS
            )),
        ))
    }
}

#[async_trait]
impl<T, G> ShortenedUrlServiceTrait for ShortenedUrlService<T, G>
where
    T: ShortenedUrlRepositoryTrait,
    G: HashGenerator,
{
    async fn resolve(&self, hash: &str, format: ResponseFormat) -> Result<Resolution> {
        // Nothing outside the token alphabet was ever issued
        if !is_base62(hash) {
            return Err(ServiceError::NotFound(URL_NOT_FOUND.to_string()));
        }

        let record = self
            .repository
            .find_one_active(hash)
            .await
            .map_err(|e| {
                error!("Lookup of hash '{}' failed: {}", hash, e);
                ServiceError::persistence("Error. URL was not resolved", e)
            })?
            .ok_or_else(|| ServiceError::NotFound(URL_NOT_FOUND.to_string()))?;

        // A failed counter update never fails the resolution
        match self.repository.increment_visits(&record.hash).await {
            Ok(0) => debug!("Hash '{}' was removed before its visit was counted", hash),
            Ok(_) => {}
            Err(e) => warn!("Could not register visit for '{}': {}", hash, e),
        }

        debug!("Resolved '{}' as {:?}", hash, format);
        Ok(Resolution::new(PublicUrlView::from(record), format))
    }

    async fn create(&self, dto: CreateShortenedUrlDto) -> Result<ShortenResult> {
        dto.validate()?;
        validate_url(&dto.url).map_err(|e| {
            debug!("Rejected '{}': {}", dto.url, e);
            ServiceError::Validation("Invalid URL".to_string())
        })?;

        let parsed = Url::parse(&dto.url)
            .map_err(|_| ServiceError::Validation("Invalid URL".to_string()))?;
        let components = UrlComponents::from(&parsed);

        let hash = self.unused_hash(&dto.url).await?;
        let remove_token = self.generator.generate_remove_token();
        let record = ShortenedUrl::new(&dto.url, components, hash, remove_token);

        let saved = self.repository.insert(&record).await.map_err(|e| {
            error!("Failed to save '{}': {}", dto.url, e);
            ServiceError::persistence(URL_NOT_SAVED, e)
        })?;

        info!("Shortened '{}' as '{}'", saved.url, saved.hash);
        Ok(ShortenResult::new(&self.origin, &saved))
    }

    async fn remove(&self, hash: &str, remove_token: &str) -> Result<u64> {
        if hash.trim().is_empty() || remove_token.trim().is_empty() {
            return Err(ServiceError::Validation("Missing hash or token".to_string()));
        }

        let affected = self
            .repository
            .remove_matching(hash, remove_token)
            .await
            .map_err(|e| {
                error!("Failed to remove '{}': {}", hash, e);
                ServiceError::persistence(URL_NOT_REMOVED, e)
            })?;

        if affected == 0 {
            info!("Remove request for '{}' matched no active URL", hash);
        } else {
            info!("Removed '{}'", hash);
        }
        Ok(affected)
    }
}
