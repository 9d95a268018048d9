use async_trait::async_trait;
use tokio::sync::RwLock;

use super::shortened_url::{Result, ShortenedUrlRepositoryTrait};
use crate::errors::RepositoryError;
use crate::models::ShortenedUrl;

/// In-process store with the same contract as the Postgres repository.
///
/// Every mutation holds the write lock for its whole match-and-update, so
/// increments never get lost and at most one remove wins per record.
#[derive(Debug, Default)]
pub struct MemoryShortenedUrlRepository {
    records: RwLock<Vec<ShortenedUrl>>,
}

impl MemoryShortenedUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored record, removed ones included
    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<ShortenedUrl> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl ShortenedUrlRepositoryTrait for MemoryShortenedUrlRepository {
    async fn find_one_active(&self, hash: &str) -> Result<Option<ShortenedUrl>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.active && r.hash == hash).cloned())
    }

    async fn insert(&self, record: &ShortenedUrl) -> Result<ShortenedUrl> {
        let mut records = self.records.write().await;
        if record.active && records.iter().any(|r| r.active && r.hash == record.hash) {
            return Err(RepositoryError::Conflict(format!(
                "Hash '{}' is already used by an active URL",
                record.hash
            )));
        }
        records.push(record.clone());
        Ok(record.clone())
    }

    async fn increment_visits(&self, hash: &str) -> Result<u64> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.active && r.hash == hash) {
            Some(record) => {
                record.visits += 1;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove_matching(&self, hash: &str, remove_token: &str) -> Result<u64> {
        let mut records = self.records.write().await;
        let mut affected = 0;
        for record in records
            .iter_mut()
            .filter(|r| r.active && r.hash == hash && r.remove_token == remove_token)
        {
            record.active = false;
            affected += 1;
        }
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::UrlComponents;

    fn record(hash: &str, token: &str) -> ShortenedUrl {
        ShortenedUrl::new(
            "https://example.com/page",
            UrlComponents::default(),
            hash.to_string(),
            token.to_string(),
        )
    }

    #[tokio::test]
    async fn insert_and_find() {
        let repo = MemoryShortenedUrlRepository::new();
        repo.insert(&record("abc1234", "tok")).await.unwrap();

        let found = repo.find_one_active("abc1234").await.unwrap().unwrap();
        assert_eq!(found.url, "https://example.com/page");
        assert!(repo.find_one_active("zzz9999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_conflicts_with_active_hash() {
        let repo = MemoryShortenedUrlRepository::new();
        repo.insert(&record("abc1234", "tok")).await.unwrap();

        let err = repo.insert(&record("abc1234", "other")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn removed_hash_can_be_reused() {
        let repo = MemoryShortenedUrlRepository::new();
        repo.insert(&record("abc1234", "tok")).await.unwrap();
        assert_eq!(repo.remove_matching("abc1234", "tok").await.unwrap(), 1);

        repo.insert(&record("abc1234", "fresh")).await.unwrap();
        let found = repo.find_one_active("abc1234").await.unwrap().unwrap();
        assert_eq!(found.remove_token, "fresh");
        assert_eq!(repo.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn increment_only_touches_active_records() {
        let repo = MemoryShortenedUrlRepository::new();
        repo.insert(&record("abc1234", "tok")).await.unwrap();

        assert_eq!(repo.increment_visits("abc1234").await.unwrap(), 1);
        assert_eq!(repo.increment_visits("missing").await.unwrap(), 0);

        repo.remove_matching("abc1234", "tok").await.unwrap();
        assert_eq!(repo.increment_visits("abc1234").await.unwrap(), 0);
        assert_eq!(repo.snapshot().await[0].visits, 1);
    }

    #[tokio::test]
    async fn remove_requires_both_fields() {
        let repo = MemoryShortenedUrlRepository::new();
        repo.insert(&record("abc1234", "tok")).await.unwrap();

        assert_eq!(repo.remove_matching("abc1234", "wrong").await.unwrap(), 0);
        assert_eq!(repo.remove_matching("other", "tok").await.unwrap(), 0);
        assert!(repo.find_one_active("abc1234").await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_not_lost() {
        let repo = Arc::new(MemoryShortenedUrlRepository::new());
        repo.insert(&record("abc1234", "tok")).await.unwrap();

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.increment_visits("abc1234").await.unwrap() })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let found = repo.find_one_active("abc1234").await.unwrap().unwrap();
        assert_eq!(found.visits, 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_removes_have_one_winner() {
        let repo = Arc::new(MemoryShortenedUrlRepository::new());
        repo.insert(&record("abc1234", "tok")).await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.remove_matching("abc1234", "tok").await.unwrap() })
            })
            .collect();

        let mut total = 0;
        for handle in handles {
            total += handle.await.unwrap();
        }
        assert_eq!(total, 1);
    }
}
