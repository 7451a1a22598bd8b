//! Tower service that mounts a feature module on first use.
//!
//! The service is registered with `nest_service` at `/api/<segment>`. The
//! first request runs the entry's deferred loader, binds the module to the
//! application state and caches the resulting router. Concurrent first
//! requests share one load. A failed load answers 503 and leaves the cache
//! empty, so the next request tries again.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::sync::OnceCell;
use tower::{Service, ServiceExt};

use crate::error::AppError;
use crate::routing::{EntityRoute, LoadError};
use crate::state::AppState;

#[derive(Clone)]
pub struct LazyFeature {
    route: EntityRoute,
    state: AppState,
    router: Arc<OnceCell<Router>>,
}

impl std::fmt::Debug for LazyFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyFeature")
            .field("segment", &self.route.path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl LazyFeature {
    pub fn new(route: EntityRoute, state: AppState) -> Self {
        Self {
            route,
            state,
            router: Arc::new(OnceCell::new()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.router.initialized()
    }

    async fn router(&self) -> Result<Router, LoadError> {
        let router = self
            .router
            .get_or_try_init(|| async {
                let segment = self.route.path.as_str();
                tracing::debug!(segment, "loading feature module");
                metrics::counter!(
                    "bank_feature_module_loads_total",
                    "segment" => segment.to_string()
                )
                .increment(1);

                let module = self.route.load().await?;
                Ok::<_, LoadError>(module.into_router().with_state(self.state.clone()))
            })
            .await?;
        Ok(router.clone())
    }
}

impl Service<Request> for LazyFeature {
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let this = self.clone();
        Box::pin(async move {
            match this.router().await {
                Ok(router) => router.oneshot(request).await,
                Err(err) => {
                    tracing::warn!(segment = %this.route.path, error = %err, "feature module load failed");
                    Ok(AppError::ServiceUnavailable(err.to_string()).into_response())
                }
            }
        })
    }
}
