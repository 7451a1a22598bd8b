//! # Application State
//!
//! Shared state for the Axum application: configuration, one in-memory
//! repository per entity, the title resolver and the optional Prometheus
//! handle.

use std::sync::Arc;

use bank_core::{Advisor, Agency, Appointment, Enterprise, Manager, MergePatch};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::i18n::{MessageCatalog, TitleResolver};
use crate::repository::InMemoryRepository;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub agencies: Arc<InMemoryRepository<Agency>>,
    pub enterprises: Arc<InMemoryRepository<Enterprise>>,
    pub advisors: Arc<InMemoryRepository<Advisor>>,
    pub managers: Arc<InMemoryRepository<Manager>>,
    pub appointments: Arc<InMemoryRepository<Appointment>>,
    pub titles: Arc<dyn TitleResolver>,
    /// Render handle of the installed Prometheus recorder, if any.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("agencies", &self.agencies)
            .field("enterprises", &self.enterprises)
            .field("advisors", &self.advisors)
            .field("managers", &self.managers)
            .field("appointments", &self.appointments)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// Create a new application state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application state with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            agencies: Arc::new(InMemoryRepository::new()),
            enterprises: Arc::new(InMemoryRepository::new()),
            advisors: Arc::new(InMemoryRepository::new()),
            managers: Arc::new(InMemoryRepository::new()),
            appointments: Arc::new(InMemoryRepository::new()),
            titles: Arc::new(MessageCatalog::english()),
            metrics: None,
        }
    }

    pub fn with_titles(mut self, titles: impl TitleResolver + 'static) -> Self {
        self.titles = Arc::new(titles);
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Alert header prefix.
    pub fn application_name(&self) -> &str {
        &self.config.application_name
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// An entity with a repository in [`AppState`].
pub trait Stored: MergePatch {
    fn repository(state: &AppState) -> &InMemoryRepository<Self>;
}

impl Stored for Agency {
    fn repository(state: &AppState) -> &InMemoryRepository<Self> {
        &state.agencies
    }
}

impl Stored for Enterprise {
    fn repository(state: &AppState) -> &InMemoryRepository<Self> {
        &state.enterprises
    }
}

impl Stored for Advisor {
    fn repository(state: &AppState) -> &InMemoryRepository<Self> {
        &state.advisors
    }
}

impl Stored for Manager {
    fn repository(state: &AppState) -> &InMemoryRepository<Self> {
        &state.managers
    }
}

impl Stored for Appointment {
    fn repository(state: &AppState) -> &InMemoryRepository<Self> {
        &state.appointments
    }
}
