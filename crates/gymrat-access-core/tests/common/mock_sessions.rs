//! Mock session providers for testing

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gymrat_access_core::{SessionError, SessionProvider};
use gymrat_types::SessionUser;

/// In-memory session provider that counts lookups
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockSessionProvider {
    session: Option<SessionUser>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockSessionProvider {
    /// Caller is signed out
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Caller is signed in with a raw tier string
    pub fn with_tier(tier: Option<&str>) -> Self {
        Self {
            session: Some(SessionUser::new("user-1", tier)),
            ..Self::default()
        }
    }

    /// Session backend is unreachable
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of `get_session` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn get_session(&self) -> Result<Option<SessionUser>, SessionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SessionError::Backend("connection refused".to_string()));
        }
        Ok(self.session.clone())
    }
}
