use rand::{rng, Rng};

/// URL-safe alphabet shared by hashes and remove tokens (0-9, A-Z, a-z)
pub const BASE62_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Generates a random base62 character
pub fn random_base62_char() -> char {
    let idx = rng().random_range(0..BASE62_CHARSET.len());
    BASE62_CHARSET[idx] as char
}

/// True when every character of `token` belongs to the base62 alphabet
pub fn is_base62(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric())
}
