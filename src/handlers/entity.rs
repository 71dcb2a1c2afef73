//! Entity CRUD handlers: create, read, update, delete. The entity is resolved from the path segment.

use crate::error::AppError;
use crate::extractors::{DbSession, JsonObject};
use crate::model::EntityDef;
use crate::response;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

fn resolve(state: &AppState, path_segment: &str) -> Result<&'static EntityDef, AppError> {
    state
        .model
        .entity_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound(format!("no such resource: {}", path_segment)))
}

/// Ids are positive integers; anything else cannot name a row.
fn parse_id(entity: &EntityDef, id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse::<i32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::not_found(entity))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    session: DbSession,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let entity = resolve(&state, &path_segment)?;
    let mut session = session.lock().await;
    let row = CrudService::create(&mut session, entity, &body).await?;
    Ok(response::projection(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    session: DbSession,
) -> Result<impl IntoResponse, AppError> {
    let entity = resolve(&state, &path_segment)?;
    let id = parse_id(entity, &id_str)?;
    let mut session = session.lock().await;
    let row = CrudService::read(&mut session, entity, id).await?;
    Ok(response::projection(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    session: DbSession,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let entity = resolve(&state, &path_segment)?;
    let id = parse_id(entity, &id_str)?;
    let mut session = session.lock().await;
    let row = CrudService::update(&mut session, entity, id, &body).await?;
    Ok(response::projection(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    session: DbSession,
) -> Result<impl IntoResponse, AppError> {
    let entity = resolve(&state, &path_segment)?;
    let id = parse_id(entity, &id_str)?;
    let mut session = session.lock().await;
    CrudService::delete(&mut session, entity, id).await?;
    Ok(response::deleted())
}
