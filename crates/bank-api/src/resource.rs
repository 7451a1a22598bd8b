//! # Entity Resource
//!
//! Generic REST handlers shared by every feature module. Mounted at
//! `/api/<segment>`, so the paths below are relative to the segment.
//!
//! | Method   | Path    | Success                        |
//! |----------|---------|--------------------------------|
//! | `POST`   | `/`     | 201 + `Location` + alert       |
//! | `GET`    | `/`     | 200, ascending id              |
//! | `GET`    | `/{id}` | 200 or 404                     |
//! | `PUT`    | `/{id}` | 200 + alert                    |
//! | `PATCH`  | `/{id}` | 200 + alert (merge-patch body) |
//! | `DELETE` | `/{id}` | 204 + alert                    |
//!
//! Identifier rules produce 400 bad-request alerts with the error keys
//! `idexists`, `idnull`, `idinvalid` and `idnotfound`.

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bank_core::{Entity, Identifier};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_path, parse_merge_patch};
use crate::headers::{entity_creation_alert, entity_deletion_alert, entity_update_alert};
use crate::state::{AppState, Stored};

/// CRUD routes for one entity type, relative to its mount point.
pub fn crud_router<E: Stored>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<E>).post(create::<E>))
        .route(
            "/{id}",
            get(get_one::<E>)
                .put(update::<E>)
                .patch(partial_update::<E>)
                .delete(delete::<E>),
        )
}

/// Check the identifier carried in a PUT or PATCH body against the path.
fn check_identifier<E: Entity>(
    application: &str,
    body_id: Option<E::Id>,
    path_id: E::Id,
) -> Result<(), AppError> {
    match body_id {
        None => Err(AppError::alert(application, E::NAME, "idnull", "Invalid id")),
        Some(id) if id != path_id => {
            Err(AppError::alert(application, E::NAME, "idinvalid", "Invalid ID"))
        }
        Some(_) => Ok(()),
    }
}

fn not_found_alert<E: Entity>(application: &str) -> AppError {
    AppError::alert(application, E::NAME, "idnotfound", "Entity not found")
}

fn path_id<E: Entity>(path: Result<Path<i64>, PathRejection>) -> Result<E::Id, AppError> {
    extract_path(path).map(E::Id::from_raw)
}

async fn create<E: Stored>(
    State(state): State<AppState>,
    body: Result<Json<E>, JsonRejection>,
) -> Result<Response, AppError> {
    let entity = extract_json(body)?;
    tracing::debug!("REST request to save {} : {:?}", E::NAME, entity);

    let application = state.application_name();
    if entity.identifier().is_some() {
        return Err(AppError::alert(
            application,
            E::NAME,
            "idexists",
            format!("A new {} cannot already have an ID", E::NAME),
        ));
    }

    let saved = E::repository(&state).save(entity);
    let id = saved
        .identifier()
        .ok_or_else(|| AppError::Internal(format!("no identifier assigned to new {}", E::NAME)))?;

    let mut headers = entity_creation_alert(application, E::NAME, &id.to_string());
    let location = HeaderValue::from_str(&format!("/api/{}/{id}", E::NAME))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    headers.insert(LOCATION, location);

    Ok((StatusCode::CREATED, headers, Json(saved)).into_response())
}

async fn update<E: Stored>(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<E>, JsonRejection>,
) -> Result<Response, AppError> {
    let id = path_id::<E>(path)?;
    let entity = extract_json(body)?;
    tracing::debug!("REST request to update {} : {}, {:?}", E::NAME, id, entity);

    let application = state.application_name();
    check_identifier::<E>(application, entity.identifier(), id)?;

    let saved = E::repository(&state)
        .update(id, |stored| *stored = entity)
        .ok_or_else(|| not_found_alert::<E>(application))?;

    Ok((
        entity_update_alert(application, E::NAME, &id.to_string()),
        Json(saved),
    )
        .into_response())
}

async fn partial_update<E: Stored>(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let id = path_id::<E>(path)?;
    let patch: E::Patch = parse_merge_patch(&headers, &body)?;
    tracing::debug!(
        "REST request to partial update {} partially : {}, {:?}",
        E::NAME,
        id,
        patch
    );

    let application = state.application_name();
    check_identifier::<E>(application, E::patch_identifier(&patch), id)?;

    let repository = E::repository(&state);
    if !repository.exists_by_id(id) {
        return Err(not_found_alert::<E>(application));
    }

    // The record can disappear between the check and the merge.
    let merged = repository
        .update(id, |stored| stored.merge(patch))
        .ok_or_else(|| AppError::NotFound(format!("{} {id}", E::NAME)))?;

    Ok((
        entity_update_alert(application, E::NAME, &id.to_string()),
        Json(merged),
    )
        .into_response())
}

async fn list<E: Stored>(State(state): State<AppState>) -> Json<Vec<E>> {
    tracing::debug!("REST request to get all {}", E::NAME);
    Json(E::repository(&state).find_all())
}

async fn get_one<E: Stored>(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<E>, AppError> {
    let id = path_id::<E>(path)?;
    tracing::debug!("REST request to get {} : {}", E::NAME, id);
    E::repository(&state)
        .find_one(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{} {id}", E::NAME)))
}

async fn delete<E: Stored>(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let id = path_id::<E>(path)?;
    tracing::debug!("REST request to delete {} : {}", E::NAME, id);
    E::repository(&state).delete_by_id(id);
    Ok((
        StatusCode::NO_CONTENT,
        entity_deletion_alert(state.application_name(), E::NAME, &id.to_string()),
    )
        .into_response())
}
