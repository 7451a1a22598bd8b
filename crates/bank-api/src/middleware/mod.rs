//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`metrics`]: request counters and latency histograms.
//!
//! Request tracing uses `tower_http::trace::TraceLayer` directly and
//! authentication lives in [`crate::auth`].

pub mod metrics;
