//! Session collaborators
//!
//! [`SessionProvider`] is the seam to whatever authenticates the caller.
//! [`SignedSessionProvider`] is the implementation services use: it reads
//! a signed session token of the form `base64url(json).base64url(hmac)`.

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use gymrat_types::SessionUser;
use serde::{Deserialize, Serialize};

use crate::crypto::SigningKey;
use crate::SessionError;

/// Source of the caller's session
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current session, `None` when the caller is not signed in
    async fn get_session(&self) -> Result<Option<SessionUser>, SessionError>;
}

/// Signed session token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// User ID
    pub user_id: String,
    /// User email
    #[serde(default)]
    pub email: Option<String>,
    /// Raw subscription tier
    #[serde(default)]
    pub subscription_tier: Option<String>,
    /// Issue timestamp (milliseconds)
    pub issued: i64,
    /// Expiration timestamp (milliseconds)
    pub expires: i64,
}

impl SessionPayload {
    /// Create a payload valid for `duration_hours`
    pub fn new(
        user_id: impl Into<String>,
        email: Option<String>,
        subscription_tier: Option<String>,
        duration_hours: u32,
    ) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            user_id: user_id.into(),
            email,
            subscription_tier,
            issued: now,
            expires: now + i64::from(duration_hours) * 60 * 60 * 1000,
        }
    }

    /// Check if the payload is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires
    }
}

impl From<SessionPayload> for SessionUser {
    fn from(payload: SessionPayload) -> Self {
        Self {
            user_id: payload.user_id,
            email: payload.email,
            subscription_tier: payload.subscription_tier,
        }
    }
}

/// Signs and verifies session tokens
#[derive(Debug, Clone)]
pub struct SessionVerifier {
    key: SigningKey,
}

impl SessionVerifier {
    /// Create a verifier from the shared session secret (at least 32 bytes)
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SessionError> {
        Ok(Self {
            key: SigningKey::new(secret)?,
        })
    }

    /// Sign a payload into a token
    pub fn sign(&self, payload: &SessionPayload) -> Result<String, SessionError> {
        let json = serde_json::to_vec(payload).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialize session payload");
            SessionError::Encoding(e.to_string())
        })?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(json);
        let signature = URL_SAFE_NO_PAD.encode(self.key.sign(payload_b64.as_bytes()));
        Ok(format!("{payload_b64}.{signature}"))
    }

    /// Verify a token's signature and expiry
    pub fn verify(&self, token: &str) -> Result<SessionPayload, SessionError> {
        let (payload_b64, signature_b64) =
            token.rsplit_once('.').ok_or(SessionError::InvalidToken)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| SessionError::InvalidToken)?;

        if !self.key.verify(payload_b64.as_bytes(), &signature) {
            tracing::debug!("Session signature mismatch");
            return Err(SessionError::InvalidToken);
        }

        let json = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| SessionError::InvalidToken)?;
        let payload: SessionPayload =
            serde_json::from_slice(&json).map_err(|_| SessionError::InvalidToken)?;

        if payload.is_expired() {
            return Err(SessionError::Expired);
        }

        Ok(payload)
    }
}

/// Session provider for a single request's token.
///
/// A missing, tampered or expired token means "not signed in"; it never
/// surfaces as an error.
#[derive(Debug, Clone)]
pub struct SignedSessionProvider {
    verifier: SessionVerifier,
    token: Option<String>,
}

impl SignedSessionProvider {
    /// Create a provider for the token presented with a request
    pub fn new(verifier: SessionVerifier, token: Option<String>) -> Self {
        Self { verifier, token }
    }
}

#[async_trait]
impl SessionProvider for SignedSessionProvider {
    async fn get_session(&self) -> Result<Option<SessionUser>, SessionError> {
        let Some(token) = self.token.as_deref() else {
            return Ok(None);
        };

        match self.verifier.verify(token) {
            Ok(payload) => Ok(Some(payload.into())),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
                Ok(None)
            }
        }
    }
}
