//! # bank-api: Axum API Service for the Bank Advice Application
//!
//! Serves the five entity resources of the bank advice application. Each
//! entity is a feature module bound to a path segment by the route
//! composer ([`routing`]) and mounted on first use.
//!
//! ## API Surface
//!
//! | Prefix                 | Module                      | Notes                    |
//! |------------------------|-----------------------------|--------------------------|
//! | `/api/agency/*`        | [`routes::agency`]          | lazily loaded            |
//! | `/api/enterprise/*`    | [`routes::enterprise`]      | lazily loaded            |
//! | `/api/advisor/*`       | [`routes::advisor`]         | lazily loaded            |
//! | `/api/manager/*`       | [`routes::manager`]         | lazily loaded            |
//! | `/api/appointment/*`   | [`routes::appointment`]     | lazily loaded            |
//! | `/api/entity-routes`   | [`routes::navigation`]      | route table listing      |
//! | `/api/openapi.json`    | [`openapi`]                 | OpenAPI document         |
//! | `/health/*`, `/metrics`| this module                 | unauthenticated          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer (optional) → TraceLayer → MetricsMiddleware → AuthMiddleware → Handler
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod headers;
pub mod i18n;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod resource;
pub mod routes;
pub mod routing;
pub mod state;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::error::AppError;
use crate::routing::lazy::LazyFeature;
use crate::routing::{entity_routes, RouteError, RouteTable};
use crate::state::AppState;

/// Assemble the full application router with the declared entity routes.
pub fn app(state: AppState) -> Result<Router, RouteError> {
    Ok(app_with_routes(state, entity_routes()?))
}

/// Assemble the application router over an arbitrary route table.
///
/// Health probes (`/health/*`) and `/metrics` are mounted outside the auth
/// middleware so they remain accessible without credentials.
pub fn app_with_routes(state: AppState, table: RouteTable) -> Router {
    let auth_config = AuthConfig::new(state.config.accounts.clone());
    let metrics_on = state.config.metrics_enabled;

    let mut api = Router::new()
        .merge(routes::navigation::router())
        .merge(openapi::router());
    for route in table.iter() {
        let mount = format!("/api/{}", route.path);
        api = api.nest_service(&mount, LazyFeature::new(route.clone(), state.clone()));
    }

    let mut api = api.layer(from_fn(auth::auth_middleware));
    if metrics_on {
        api = api.layer(from_fn(middleware::metrics::metrics_middleware));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .layer(Extension(auth_config))
        .layer(Extension(table))
        .with_state(state.clone());

    let mut unauthenticated = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));
    if metrics_on {
        unauthenticated = unauthenticated.route("/metrics", get(prometheus_metrics));
    }
    let unauthenticated = unauthenticated.with_state(state.clone());

    let app = Router::new().merge(unauthenticated).merge(api);
    if state.config.cors_enabled {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// GET /metrics: Prometheus text exposition of the installed recorder.
async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            handle.render(),
        )
            .into_response(),
        None => AppError::ServiceUnavailable("metrics recorder not installed".to_string())
            .into_response(),
    }
}

/// Liveness probe. Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The stores are in memory, so a running process is ready.
async fn readiness() -> &'static str {
    "ready"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_probes() {
        assert_eq!(
            get_text(app(AppState::new()).unwrap(), "/health/liveness").await,
            (StatusCode::OK, "ok".to_string())
        );
        assert_eq!(
            get_text(app(AppState::new()).unwrap(), "/health/readiness").await,
            (StatusCode::OK, "ready".to_string())
        );
    }

    #[tokio::test]
    async fn metrics_without_recorder_is_503() {
        let (status, _) = get_text(app(AppState::new()).unwrap(), "/metrics").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn metrics_route_absent_when_disabled() {
        let config = config::AppConfig {
            metrics_enabled: false,
            ..Default::default()
        };
        let app = app(AppState::with_config(config)).unwrap();
        let (status, _) = get_text(app, "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
