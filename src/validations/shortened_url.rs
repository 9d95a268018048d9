use url::Url;
use validator::ValidationError;

/// RFC 3986 gen-delims and sub-delims
const RESERVED: &str = ":/?#[]@!$&'()*+,;=";

/// Validates that a string is a syntactically valid absolute URI.
///
/// Only characters RFC 3986 allows are accepted, and every `%` must start a
/// two-digit hex escape. Any scheme is accepted as long as the rest parses
/// under that scheme's grammar; relative references are rejected.
pub fn validate_url(url_str: &str) -> Result<(), ValidationError> {
    if url_str.trim() != url_str {
        return Err(invalid_url("URL must not have surrounding whitespace"));
    }
    if !has_only_uri_chars(url_str) {
        return Err(invalid_url("URL contains characters outside the URI grammar"));
    }

    match Url::parse(url_str) {
        Ok(url) if url.cannot_be_a_base() && url.path().is_empty() => {
            Err(invalid_url("URL must have a host or path"))
        }
        Ok(_) => Ok(()),
        Err(_) => Err(invalid_url("Invalid URL format")),
    }
}

fn has_only_uri_chars(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let escaped = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !escaped {
                return false;
            }
            i += 3;
            continue;
        }
        let unreserved = b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~');
        if !unreserved && !RESERVED.as_bytes().contains(&b) {
            return false;
        }
        i += 1;
    }
    true
}

fn invalid_url(reason: &'static str) -> ValidationError {
    let mut err = ValidationError::new("invalid_url");
    err.message = Some(reason.into());
    err
}
