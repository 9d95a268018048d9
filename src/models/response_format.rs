use super::PublicUrlView;

/// How the caller wants a resolved URL delivered, decoded once from `Accept`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    PlainText,
    Json,
    #[default]
    Redirect,
}

impl ResponseFormat {
    /// Exact match on the header value; anything unrecognised redirects
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept.map(|value| value.trim().to_ascii_lowercase()) {
            Some(value) if value == "text/plain" => ResponseFormat::PlainText,
            Some(value) if value == "application/json" => ResponseFormat::Json,
            _ => ResponseFormat::Redirect,
        }
    }
}

/// Outcome of resolving a hash, ready for the transport layer to encode
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    PlainText(String),
    Json(PublicUrlView),
    Redirect(String),
}

impl Resolution {
    pub fn new(view: PublicUrlView, format: ResponseFormat) -> Self {
        match format {
            ResponseFormat::PlainText => Resolution::PlainText(view.url),
            ResponseFormat::Json => Resolution::Json(view),
            ResponseFormat::Redirect => Resolution::Redirect(view.url),
        }
    }
}
