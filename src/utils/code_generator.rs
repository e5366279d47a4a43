//! Deterministic short code derivation.
//!
//! Codes are derived from the URL itself rather than drawn from a random
//! source, so the same URL always maps to the same code at a given length.
//! Collision handling lives in the shortener service, not here.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;
use sha2::{Digest, Sha256};

/// The 62-character output alphabet: uppercase, lowercase, digits, in that order.
const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Derives a short code of exactly `length` alphanumeric characters from a URL.
///
/// The SHA-256 digest of the URL's UTF-8 bytes is encoded as URL-safe Base64
/// without padding, then scanned left to right keeping only `[A-Za-z0-9]`.
/// Should the digest stream run out before `length` characters are collected,
/// the code is extended from a seed hash of the URL (see [`seed_hash`]), so
/// even oversized codes stay fully deterministic.
///
/// # Errors
///
/// Returns [`AppError::InvalidLength`] when `length` is zero. That is a
/// configuration or programmer error and is never retried.
///
/// # Examples
///
/// ```ignore
/// let a = generate_code("https://example.com", 8)?;
/// let b = generate_code("https://example.com", 8)?;
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 8);
/// ```
pub fn generate_code(url: &str, length: usize) -> Result<String, AppError> {
    if length == 0 {
        return Err(AppError::invalid_length(
            "Code length must be positive",
            json!({ "requested_length": length }),
        ));
    }

    let digest = Sha256::digest(url.as_bytes());
    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);

    // URL-safe Base64 only adds '-' and '_' beyond the target alphabet, so
    // an ASCII-alphanumeric filter is exactly the 62-character cut.
    let mut code: String = encoded
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(length)
        .collect();

    let seed = seed_hash(url);
    while code.len() < length {
        let mut index = (code.len() as i32).wrapping_mul(31).wrapping_add(seed) % 62;
        if index < 0 {
            index += 62;
        }
        code.push(ALPHABET[index as usize] as char);
    }

    Ok(code)
}

/// Deterministic 31-based polynomial hash over the URL's UTF-16 code units,
/// in wrapping 32-bit arithmetic.
///
/// Seeds the extension path of [`generate_code`]. The exact arithmetic is
/// compatibility-sensitive: changing it would re-key every stored code whose
/// length exceeds the digest's alphanumeric supply.
fn seed_hash(url: &str) -> i32 {
    url.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}
