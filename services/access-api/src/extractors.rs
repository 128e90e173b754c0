//! Axum extractors for session-backed feature gates

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use gymrat_access_core::{FeatureGate, SignedSessionProvider};

use crate::state::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "gymrat_session";

/// Feature gate for the caller of the current request.
///
/// Extraction never fails: a request without a usable session token gets
/// a gate that sees no session.
pub struct Gate(pub FeatureGate<SignedSessionProvider>);

impl std::ops::Deref for Gate {
    type Target = FeatureGate<SignedSessionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Gate
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let provider = SignedSessionProvider::new(app_state.sessions.clone(), extract_token(parts));
        Ok(Self(FeatureGate::new(app_state.evaluator, provider)))
    }
}

/// Extract token from Authorization header or session cookie
fn extract_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| {
            cookie
                .trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .find(|token| !token.is_empty())
        .map(str::to_string)
}
