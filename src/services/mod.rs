use std::sync::Arc;

use actix_web::web;
use log::info;

mod shortened_url;

pub use shortened_url::{ShortenedUrlService, ShortenedUrlServiceTrait};

use crate::{
    config::{Config, StorageBackend},
    db::Database,
    errors::ConfigError,
    repositories::{MemoryShortenedUrlRepository, PostgresShortenedUrlRepository},
    utils::ShortIdGenerator,
};

/// Shared handle the handlers resolve from app data
pub type ShortenedUrlServiceData = web::Data<dyn ShortenedUrlServiceTrait>;

/// Build the shortening service over the configured store.
/// `db` must be present for the Postgres backend.
pub fn build(config: &Config, db: Option<&Database>) -> Result<ShortenedUrlServiceData, ConfigError> {
    let generator = ShortIdGenerator::new(config.shortener.hash_length);
    let origin = config.domain.origin();
    info!("Generating {}-character hashes", generator.length());

    let service: Arc<dyn ShortenedUrlServiceTrait> = match (config.shortener.storage, db) {
        (StorageBackend::Postgres, Some(db)) => {
            info!("Storing shortened URLs in Postgres");
            let repository = PostgresShortenedUrlRepository::new(db);
            Arc::new(ShortenedUrlService::new(Arc::new(repository), generator, origin))
        }
        (StorageBackend::Postgres, None) => {
            return Err(ConfigError::InvalidValue {
                key: "STORAGE_BACKEND",
                reason: "postgres storage requires a database connection".to_string(),
            })
        }
        (StorageBackend::Memory, _) => {
            info!("Storing shortened URLs in memory; records are lost on restart");
            let repository = MemoryShortenedUrlRepository::new();
            Arc::new(ShortenedUrlService::new(Arc::new(repository), generator, origin))
        }
    };

    Ok(web::Data::from(service))
}
