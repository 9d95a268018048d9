mod memory;
mod shortened_url;

pub use memory::MemoryShortenedUrlRepository;
#[cfg(test)]
pub use shortened_url::MockShortenedUrlRepositoryTrait;
pub use shortened_url::{PostgresShortenedUrlRepository, ShortenedUrlRepositoryTrait};
