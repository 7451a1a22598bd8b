//! # Entity Route Composer
//!
//! Declares which entity feature modules exist and binds each one to a path
//! segment under `/api`. A module is represented by a deferred loader: a
//! zero-argument async factory that is not invoked until a request
//! navigates to its segment. Nothing here inspects a module's internals.
//!
//! The table is fixed at startup ([`entity_routes`]). Loading is cached per
//! mount by [`lazy::LazyFeature`].

pub mod lazy;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::Router;
use serde::Serialize;
use thiserror::Error;

use crate::state::AppState;

/// A self-contained router for one entity, produced by a deferred loader.
pub struct FeatureModule {
    router: Router<AppState>,
}

impl FeatureModule {
    pub fn new(router: Router<AppState>) -> Self {
        Self { router }
    }

    pub fn into_router(self) -> Router<AppState> {
        self.router
    }
}

impl fmt::Debug for FeatureModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureModule").finish_non_exhaustive()
    }
}

/// A deferred loader failed to produce its module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("feature module {segment:?} failed to load: {reason}")]
pub struct LoadError {
    pub segment: String,
    pub reason: String,
}

/// Errors raised by the [`RouteTable`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("route segment {0:?} is already declared")]
    DuplicateSegment(String),

    #[error("no route declared for segment {0:?}")]
    UnknownSegment(String),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// The future returned by a deferred loader.
pub type ModuleFuture = Pin<Box<dyn Future<Output = Result<FeatureModule, LoadError>> + Send>>;

/// A deferred loader.
pub type Loader = Arc<dyn Fn() -> ModuleFuture + Send + Sync>;

/// Route metadata consumed by the UI chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    /// Translation key of the page title.
    pub page_title: String,
}

/// Translation key of an entity page title.
pub fn page_title_key(segment: &str) -> String {
    format!("bankAdviceApp.{segment}.home.title")
}

/// One entry of the route table.
#[derive(Clone)]
pub struct EntityRoute {
    pub path: String,
    pub data: RouteData,
    load_children: Loader,
}

impl fmt::Debug for EntityRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRoute")
            .field("path", &self.path)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl EntityRoute {
    pub fn new<F, Fut>(path: impl Into<String>, data: RouteData, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<FeatureModule, LoadError>> + Send + 'static,
    {
        Self {
            path: path.into(),
            data,
            load_children: Arc::new(move || Box::pin(loader()) as ModuleFuture),
        }
    }

    /// An entity route whose page title follows the `<app>.<segment>.home.title`
    /// convention.
    pub fn entity<F, Fut>(segment: &str, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<FeatureModule, LoadError>> + Send + 'static,
    {
        Self::new(
            segment,
            RouteData {
                page_title: page_title_key(segment),
            },
            loader,
        )
    }

    /// Invoke the deferred loader.
    pub async fn load(&self) -> Result<FeatureModule, LoadError> {
        (self.load_children)().await
    }
}

/// Ordered set of entity routes with unique path segments.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<EntityRoute>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate segments.
    pub fn new(routes: impl IntoIterator<Item = EntityRoute>) -> Result<Self, RouteError> {
        routes
            .into_iter()
            .try_fold(Self::default(), |table, route| table.with_route(route))
    }

    /// Append an entry.
    pub fn with_route(mut self, route: EntityRoute) -> Result<Self, RouteError> {
        if self.get(&route.path).is_some() {
            return Err(RouteError::DuplicateSegment(route.path));
        }
        self.routes.push(route);
        Ok(self)
    }

    pub fn get(&self, segment: &str) -> Option<&EntityRoute> {
        self.routes.iter().find(|r| r.path == segment)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityRoute> {
        self.routes.iter()
    }

    /// Path segments in declaration order.
    pub fn segments(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.path.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Load the module bound to `segment`. Only that entry's loader runs.
    pub async fn load(&self, segment: &str) -> Result<FeatureModule, RouteError> {
        let route = self
            .get(segment)
            .ok_or_else(|| RouteError::UnknownSegment(segment.to_string()))?;
        Ok(route.load().await?)
    }
}

/// The entity routes of the application.
pub fn entity_routes() -> Result<RouteTable, RouteError> {
    RouteTable::new([
        EntityRoute::entity("agency", crate::routes::agency::load),
        EntityRoute::entity("enterprise", crate::routes::enterprise::load),
        EntityRoute::entity("advisor", crate::routes::advisor::load),
        EntityRoute::entity("manager", crate::routes::manager::load),
        EntityRoute::entity("appointment", crate::routes::appointment::load),
        // entity generator: add new entity routes here
    ])
}
