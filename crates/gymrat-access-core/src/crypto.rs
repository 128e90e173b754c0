//! HMAC primitives for session tokens

use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::SessionError;

/// Validated HMAC-SHA256 signing key
#[derive(Clone)]
pub struct SigningKey {
    key_bytes: Arc<[u8]>,
}

impl SigningKey {
    /// Minimum key length in bytes (256 bits)
    pub const MIN_KEY_LENGTH: usize = 32;

    /// Create a key, rejecting secrets shorter than [`Self::MIN_KEY_LENGTH`]
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SessionError> {
        let bytes = secret.as_ref();
        if bytes.len() < Self::MIN_KEY_LENGTH {
            return Err(SessionError::SecretTooShort {
                actual: bytes.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        Ok(Self {
            key_bytes: Arc::from(bytes),
        })
    }

    /// Sign data and return the MAC bytes
    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        // HMAC accepts keys of any length, so this never takes the error branch.
        let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&self.key_bytes) else {
            return Vec::new();
        };
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }

    /// Verify a MAC in constant time
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        constant_time_eq(&self.sign(data), signature)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_length", &self.key_bytes.len())
            .finish_non_exhaustive()
    }
}

/// Compare two byte slices without short-circuiting on the first mismatch.
///
/// Length is not secret, so differing lengths return early.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_short_secret_rejected() {
        assert_eq!(
            SigningKey::new("short").unwrap_err(),
            SessionError::SecretTooShort { actual: 5, minimum: 32 }
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let key = SigningKey::new(SECRET).unwrap();
        let sig = key.sign(b"payload");
        assert_eq!(sig.len(), 32);
        assert!(key.verify(b"payload", &sig));
        assert!(!key.verify(b"payloae", &sig));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_debug_hides_key() {
        let key = SigningKey::new(SECRET).unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("key_length"));
    }
}
