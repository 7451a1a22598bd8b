//! `GET /api/entity-routes`: the route table as the UI chrome sees it.
//!
//! Listing the table never invokes a deferred loader.

use axum::extract::State;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::routing::RouteTable;
use crate::state::AppState;

/// One entity route with its resolved page title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityRouteSummary {
    /// Path segment under `/api`.
    pub path: String,
    /// Translation key of the page title.
    pub page_title: String,
    /// Page title resolved through the message catalog.
    pub title: String,
}

/// Requires an `Extension<RouteTable>` layer.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/entity-routes", get(list_entity_routes))
}

#[utoipa::path(
    get,
    path = "/api/entity-routes",
    responses(
        (status = 200, description = "Declared entity routes in order", body = Vec<EntityRouteSummary>),
    ),
    tag = "navigation"
)]
pub(crate) async fn list_entity_routes(
    State(state): State<AppState>,
    Extension(table): Extension<RouteTable>,
) -> Json<Vec<EntityRouteSummary>> {
    let summaries = table
        .iter()
        .map(|route| EntityRouteSummary {
            path: route.path.clone(),
            page_title: route.data.page_title.clone(),
            title: state.titles.resolve_or_key(&route.data.page_title),
        })
        .collect();
    Json(summaries)
}
