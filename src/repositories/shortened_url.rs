// src/repositories/shortened_url.rs - Data access
use async_trait::async_trait;
use log::{debug, error};
use sqlx::PgPool;

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::ShortenedUrl;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenedUrlRepositoryTrait: Send + Sync {
    /// Finds the active record owning `hash`
    ///
    /// ### Returns
    /// * `Result<Option<ShortenedUrl>>` - The record, or `None` when no active record matches
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    async fn find_one_active(&self, hash: &str) -> Result<Option<ShortenedUrl>>;

    /// Persists a new record in full, or not at all
    ///
    /// ### Errors
    /// * `RepositoryError::Conflict` - If an active record already owns the hash
    /// * `RepositoryError::Database` - If a database error occurs
    async fn insert(&self, record: &ShortenedUrl) -> Result<ShortenedUrl>;

    /// Atomically adds one visit to the active record owning `hash`
    ///
    /// ### Returns
    /// * `Result<u64>` - Number of records updated (0 or 1)
    async fn increment_visits(&self, hash: &str) -> Result<u64>;

    /// Deactivates the active record whose hash AND remove token both match.
    /// The match and the update happen as one atomic step.
    ///
    /// ### Returns
    /// * `Result<u64>` - Number of records deactivated; 0 when nothing matched
    async fn remove_matching(&self, hash: &str, remove_token: &str) -> Result<u64>;
}

const RECORD_COLUMNS: &str =
    "id, url, protocol, domain, path, hash, is_custom, remove_token, active, visits, created_at";

pub struct PostgresShortenedUrlRepository {
    pool: PgPool,
}

impl PostgresShortenedUrlRepository {
    pub fn new(db: &Database) -> Self {
        Self::from_pool(db.get_pool().clone())
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortenedUrlRepositoryTrait for PostgresShortenedUrlRepository {
    async fn find_one_active(&self, hash: &str) -> Result<Option<ShortenedUrl>> {
        let query = format!(
            "SELECT {} FROM shortened_urls WHERE hash = $1 AND active = TRUE LIMIT 1",
            RECORD_COLUMNS
        );

        sqlx::query_as::<_, ShortenedUrl>(&query)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::Database)
    }

    async fn insert(&self, record: &ShortenedUrl) -> Result<ShortenedUrl> {
        let query = format!(
            r#"
            INSERT INTO shortened_urls
            (id, url, protocol, domain, path, hash, is_custom, remove_token, active, visits, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            RECORD_COLUMNS
        );

        sqlx::query_as::<_, ShortenedUrl>(&query)
            .bind(record.id)
            .bind(&record.url)
            .bind(&record.protocol)
            .bind(&record.domain)
            .bind(&record.path)
            .bind(&record.hash)
            .bind(record.is_custom)
            .bind(&record.remove_token)
            .bind(record.active)
            .bind(record.visits)
            .bind(record.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to insert shortened URL: {}", e);
                RepositoryError::from(e)
            })
    }

    async fn increment_visits(&self, hash: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE shortened_urls SET visits = visits + 1 WHERE hash = $1 AND active = TRUE",
        )
        .bind(hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn remove_matching(&self, hash: &str, remove_token: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE shortened_urls
            SET active = FALSE
            WHERE hash = $1 AND remove_token = $2 AND active = TRUE
            "#,
        )
        .bind(hash)
        .bind(remove_token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to remove shortened URL '{}': {}", hash, e);
            RepositoryError::from(e)
        })?;

        let affected = result.rows_affected();
        debug!("Deactivated {} record(s) for hash '{}'", affected, hash);
        Ok(affected)
    }
}
