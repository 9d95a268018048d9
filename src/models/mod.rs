mod response_format;
mod shortened_url;

pub use response_format::{Resolution, ResponseFormat};
pub use shortened_url::{
    CreateShortenedUrlDto, PublicUrlView, ShortenResult, ShortenedUrl, UrlComponents,
};
