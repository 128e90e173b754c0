//! GymRat Access API
//!
//! Tier and feature access service for request handlers and edge proxies.
//!
//! ## REST Endpoints
//!
//! - `GET /api/v1/features` - List the feature catalog
//! - `GET /api/v1/tiers/{tier}/features` - What a tier unlocks
//! - `GET /api/v1/me/tier` - Caller's tier and features
//! - `GET /api/v1/me/features/{feature_id}` - Soft feature check
//! - `GET /api/v1/gate/{feature_id}` - Hard feature gate (204 / 401 / 403)
//! - `GET /api/v1/plans/{plan_id}/tier` - Tier granted by a billing plan
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /metrics` - Prometheus metrics

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("access_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GymRat Access API");

    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        plans = ?config.plans,
        "Configuration loaded"
    );

    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::from_config(config)?;
    let app = build_router(state, metrics_handle);

    tracing::info!("HTTP server listening on {}", http_addr);
    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    let api_v1 = Router::new()
        // Catalog routes
        .route("/features", get(handlers::list_features))
        .route("/tiers/{tier}/features", get(handlers::tier_features))
        // Caller routes
        .route("/me/tier", get(handlers::my_tier))
        .route("/me/features/{feature_id}", get(handlers::feature_access))
        .route("/gate/{feature_id}", get(handlers::require_feature))
        // Billing routes
        .route("/plans/{plan_id}/tier", get(handlers::plan_tier));

    let health_routes = Router::new().route("/health", get(handlers::health));

    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Outermost first
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .nest("/api/v1", api_v1)
        .fallback(handlers::not_found)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!(
        "access_checks_total",
        "Feature access checks by operation and outcome"
    );

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use gymrat_access_core::{FeatureCatalog, SessionPayload, SessionVerifier};
    use gymrat_billing_core::PlanConfig;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    const SECRET: &str = "router-test-secret-0123456789abcdef";

    fn test_state() -> AppState {
        let config = Config {
            http_port: 0,
            session_secret: SECRET.to_string(),
            feature_catalog_path: None,
            request_timeout: Duration::from_secs(5),
            metrics_enabled: false,
            plans: PlanConfig::new()
                .with_pro_plan("P-PRO")
                .with_instructor_plan("P-INS"),
        };
        let sessions = SessionVerifier::new(SECRET).unwrap();
        AppState::new(FeatureCatalog::standard(), sessions, config)
    }

    fn token(tier: Option<&str>) -> String {
        SessionVerifier::new(SECRET)
            .unwrap()
            .sign(&SessionPayload::new(
                "user-1",
                None,
                tier.map(str::to_string),
                1,
            ))
            .unwrap()
    }

    async fn send(uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = build_router(test_state(), None)
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_list_features() {
        let (status, body) = send("/api/v1/features", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["features"].as_array().unwrap().len(), 13);
    }

    #[tokio::test]
    async fn test_tier_features() {
        let (status, body) = send("/api/v1/tiers/PRO/features", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"], "PRO");
        assert_eq!(body["displayName"], "Pro");
        assert_eq!(body["features"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_unknown_tier_shows_free() {
        let (_, body) = send("/api/v1/tiers/SUPERADMIN/features", None).await;
        assert_eq!(body["tier"], "FREE");
        assert_eq!(body["features"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_my_tier_signed_out() {
        let (status, body) = send("/api/v1/me/tier", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"], "FREE");
    }

    #[tokio::test]
    async fn test_my_tier_instructor() {
        let token = token(Some("INSTRUCTOR"));
        let (_, body) = send("/api/v1/me/tier", Some(&token)).await;
        assert_eq!(body["tier"], "INSTRUCTOR");
        assert_eq!(body["features"].as_array().unwrap().len(), 13);
    }

    #[tokio::test]
    async fn test_soft_check() {
        let token = token(Some("FREE"));
        let (status, body) = send("/api/v1/me/features/WEIGHT_TRACKING", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], true);

        let (_, body) = send("/api/v1/me/features/AI_NUTRITION", Some(&token)).await;
        assert_eq!(body["allowed"], false);

        let (status, body) = send("/api/v1/me/features/COMMUNITY", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], false);
    }

    #[tokio::test]
    async fn test_gate_allows() {
        let token = token(Some("INSTRUCTOR"));
        let (status, _) = send("/api/v1/gate/WORKOUT_ASSIGNMENT", Some(&token)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_gate_upgrade_required() {
        let token = token(Some("FREE"));
        let (status, body) = send("/api/v1/gate/AI_NUTRITION", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "UPGRADE_REQUIRED");
        assert_eq!(body["error"]["requiredTier"], "PRO");
        assert!(body["error"]["message"].as_str().unwrap().contains("Pro"));
    }

    #[tokio::test]
    async fn test_gate_signed_out() {
        let (status, body) = send("/api/v1/gate/COMMUNITY", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_gate_rejects_forged_token() {
        let forged = SessionVerifier::new("some-other-secret-0123456789abcdef")
            .unwrap()
            .sign(&SessionPayload::new("user-1", None, Some("INSTRUCTOR".into()), 1))
            .unwrap();
        let (status, _) = send("/api/v1/gate/STUDENT_MANAGEMENT", Some(&forged)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_plan_tier() {
        let (status, body) = send("/api/v1/plans/P-INS/tier", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["planId"], "P-INS");
        assert_eq!(body["tier"], "INSTRUCTOR");
        assert_eq!(body["displayName"], "Instructor");

        let (_, body) = send("/api/v1/plans/P-UNKNOWN/tier", None).await;
        assert_eq!(body["tier"], "FREE");
    }

    #[tokio::test]
    async fn test_lowercase_session_tier_is_free() {
        let token = token(Some("instructor"));
        let (status, _) = send("/api/v1/gate/STUDENT_MANAGEMENT", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send("/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
