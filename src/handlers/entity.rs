//! Entity CRUD handlers: create, list, read, update, delete.
//! Each handler validates its input, makes one store call and maps the outcome.

use crate::error::{AppError, ErrorBody, ErrorKey, StoreError, StoreErrorKind};
use crate::model::{EntityId, PersistedEntity, TransportEntity};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

pub const ENTITY_NOT_FOUND: &str = "Entity not found";
pub const ENTITY_DOES_NOT_EXIST: &str = "entity does not exist";
pub const STATUS_CONFLICT: &str = "status conflict";
pub const UPDATE_LOOKUP_FAILED: &str = "result did not work";
pub const UPDATE_SAVE_FAILED: &str = "could not save to db";
pub const DELETE_LOOKUP_FAILED: &str = ".find() did not work";
pub const DELETE_FAILED: &str = "delete did not work";

fn parse_id(id_str: &str) -> Option<EntityId> {
    id_str.trim().parse().ok()
}

/// Create an entity. Responds with the stored record, including its assigned id.
#[utoipa::path(
    post,
    path = "/entities/",
    request_body = TransportEntity,
    responses(
        (status = 200, description = "Entity created", body = PersistedEntity),
        (status = 400, description = "Body is not a valid entity", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "entities"
)]
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PersistedEntity>, AppError> {
    let fields = RequestValidator::transport_entity(&body)?;
    let row = state
        .store
        .create(&fields)
        .await
        .map_err(|e| AppError::internal(ErrorKey::Error, e.to_string()))?;
    Ok(Json(row))
}

#[utoipa::path(
    get,
    path = "/entities/",
    responses(
        (status = 200, description = "All entities", body = Vec<PersistedEntity>),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "entities"
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PersistedEntity>>, AppError> {
    let rows = state
        .store
        .list_all()
        .await
        .map_err(|e| AppError::internal(ErrorKey::Error, e.to_string()))?;
    tracing::debug!(count = rows.len(), "listed entities");
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/entities/{id}",
    params(("id" = i32, Path, description = "Entity id")),
    responses(
        (status = 200, description = "The entity", body = PersistedEntity),
        (status = 404, description = "No such entity", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "entities"
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<PersistedEntity>, AppError> {
    let id = parse_id(&id_str).ok_or_else(|| AppError::not_found(ErrorKey::Error, ENTITY_NOT_FOUND))?;
    let row = state.store.find_by_id(id).await.map_err(|e| match e.kind() {
        StoreErrorKind::NotFound => AppError::not_found(ErrorKey::Error, ENTITY_NOT_FOUND),
        StoreErrorKind::Internal => AppError::internal(ErrorKey::Error, e.to_string()),
    })?;
    // Stores are expected to filter these already.
    if row.is_logically_absent() {
        return Err(AppError::not_found(ErrorKey::Message, ENTITY_DOES_NOT_EXIST));
    }
    Ok(Json(row))
}

/// Replace type, name and description of an existing entity. The body must carry its `id`.
#[utoipa::path(
    put,
    path = "/entities/",
    request_body = PersistedEntity,
    responses(
        (status = 200, description = "Saved entity", body = PersistedEntity),
        (status = 409, description = "Body is not a valid entity, or the save failed", body = ErrorBody),
        (status = 500, description = "No entity with that id", body = ErrorBody)
    ),
    tag = "entities"
)]
pub async fn update(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PersistedEntity>, AppError> {
    let record = RequestValidator::persisted_entity(&body).map_err(|e| {
        tracing::debug!(error = %e, "update body rejected");
        AppError::conflict(STATUS_CONFLICT)
    })?;
    let saved = state.store.update(&record).await.map_err(|e| update_failure(&e))?;
    Ok(Json(saved))
}

fn update_failure(e: &StoreError) -> AppError {
    match e.kind() {
        StoreErrorKind::NotFound => AppError::internal(ErrorKey::Message, UPDATE_LOOKUP_FAILED),
        StoreErrorKind::Internal => {
            tracing::warn!(error = %e, "update failed");
            AppError::conflict(UPDATE_SAVE_FAILED)
        }
    }
}

/// Delete an entity. Responds with its last values.
#[utoipa::path(
    delete,
    path = "/entities/{id}",
    params(("id" = i32, Path, description = "Entity id")),
    responses(
        (status = 200, description = "Deleted entity", body = PersistedEntity),
        (status = 500, description = "Lookup or delete failed", body = ErrorBody)
    ),
    tag = "entities"
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<PersistedEntity>, AppError> {
    let id = parse_id(&id_str).ok_or_else(|| AppError::internal(ErrorKey::Message, DELETE_LOOKUP_FAILED))?;
    let row = state.store.delete(id).await.map_err(|e| match e.kind() {
        StoreErrorKind::NotFound => AppError::internal(ErrorKey::Message, DELETE_LOOKUP_FAILED),
        StoreErrorKind::Internal => {
            tracing::warn!(id, error = %e, "delete failed");
            AppError::internal(ErrorKey::Message, DELETE_FAILED)
        }
    })?;
    Ok(Json(row))
}
