use std::iter;

use super::hash::random_base62_char;
use crate::config::MIN_HASH_LENGTH;

/// Produces public hashes and removal secrets for shortened URLs
pub trait HashGenerator: Send + Sync {
    /// Hash for a new record. The current policy ignores `url` and returns a fresh random token.
    fn generate(&self, url: &str) -> String;

    /// Secret that grants removal rights; drawn from the same token space as hashes.
    fn generate_remove_token(&self) -> String;
}

/// Random base62 generator; 62^9 possible hashes at the default length
#[derive(Debug, Clone)]
pub struct ShortIdGenerator {
    length: usize,
}

impl ShortIdGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(MIN_HASH_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for ShortIdGenerator {
    fn default() -> Self {
        Self::new(9)
    }
}

impl HashGenerator for ShortIdGenerator {
    fn generate(&self, _url: &str) -> String {
        generate_short_id(self.length)
    }

    fn generate_remove_token(&self) -> String {
        generate_short_id(self.length)
    }
}

/// Generates a random short ID of exactly `length` base62 characters
pub fn generate_short_id(length: usize) -> String {
    iter::repeat_with(random_base62_char).take(length).collect()
}
