//! # Alert Headers
//!
//! The client application shows a notification for every entity write. The
//! server tells it which one through two headers:
//!
//! - `X-<app>-alert: <app>.<entity>.created|updated|deleted` (or
//!   `X-<app>-error: error.<key>` on failure)
//! - `X-<app>-params: <id or entity name>`

use axum::http::{HeaderMap, HeaderName, HeaderValue};

fn insert(headers: &mut HeaderMap, name: String, value: String) {
    match (
        HeaderName::try_from(name.as_str()),
        HeaderValue::try_from(value.as_str()),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!(header = %name, "skipping alert header with invalid characters"),
    }
}

fn alert(application: &str, message: String, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, format!("X-{application}-alert"), message);
    insert(&mut headers, format!("X-{application}-params"), param.to_string());
    headers
}

pub fn entity_creation_alert(application: &str, entity_name: &str, param: &str) -> HeaderMap {
    alert(
        application,
        format!("{application}.{entity_name}.created"),
        param,
    )
}

pub fn entity_update_alert(application: &str, entity_name: &str, param: &str) -> HeaderMap {
    alert(
        application,
        format!("{application}.{entity_name}.updated"),
        param,
    )
}

pub fn entity_deletion_alert(application: &str, entity_name: &str, param: &str) -> HeaderMap {
    alert(
        application,
        format!("{application}.{entity_name}.deleted"),
        param,
    )
}

/// Headers for a rejected entity request.
pub fn failure_alert(application: &str, entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(
        &mut headers,
        format!("X-{application}-error"),
        format!("error.{error_key}"),
    );
    insert(
        &mut headers,
        format!("X-{application}-params"),
        entity_name.to_string(),
    );
    headers
}
