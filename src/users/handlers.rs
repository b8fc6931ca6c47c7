use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    body::JsonBody,
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, CreatedUserResponse, DeletedUserResponse},
        repo_types::{NewUser, User},
    },
};

pub const CREATED_MESSAGE: &str = "Usuario creado exitosamente";
pub const DELETED_MESSAGE: &str = "Usuario eliminado exitosamente";
pub const REQUIRED_FIELDS: &str = "name and email are required";
pub const INVALID_ID: &str = "invalid id";

/// Collection and item routes. Unsupported methods on either path answer
/// with the JSON 404 rather than 405.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/usuarios",
            get(list_users).post(create_user).fallback(route_not_found),
        )
        .route("/usuarios/:id", delete(delete_user).fallback(route_not_found))
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .store
        .list_active()
        .await
        .map_err(|e| state.storage_error("failed to list users", e))?;
    debug!(count = users.len(), "listed users");
    Ok(Json(users))
}

#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<Json<CreatedUserResponse>, ApiError> {
    let new_user = validate_new_user(body)?;

    let usuario_id = state
        .store
        .insert(new_user)
        .await
        .map_err(|e| state.storage_error("failed to create user", e))?;

    info!(usuario_id, "user created");
    Ok(Json(CreatedUserResponse {
        success: true,
        usuario_id,
        mensaje: CREATED_MESSAGE,
    }))
}

#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedUserResponse>, ApiError> {
    let id = raw_id
        .ok()
        .and_then(|Path(raw)| parse_id(&raw))
        .ok_or_else(|| {
            warn!("delete with non-numeric id");
            ApiError::Validation(INVALID_ID)
        })?;

    let rows = state
        .store
        .deactivate(id)
        .await
        .map_err(|e| state.storage_error("failed to delete user", e))?;

    // deleting an unknown or already inactive id is still a success
    if rows == 0 {
        debug!(id, "no active user matched");
    } else {
        info!(id, "user deactivated");
    }
    Ok(Json(DeletedUserResponse {
        success: true,
        mensaje: DELETED_MESSAGE,
    }))
}

/// Presence checks only: name and email must be non-empty strings. An empty
/// phone is stored as NULL.
fn validate_new_user(body: CreateUserRequest) -> Result<NewUser, ApiError> {
    let nombre = body.nombre.filter(|s| !s.is_empty());
    let email = body.email.filter(|s| !s.is_empty());
    match (nombre, email) {
        (Some(nombre), Some(email)) => Ok(NewUser {
            nombre,
            email,
            telefono: body.telefono.filter(|s| !s.is_empty()),
        }),
        _ => {
            warn!("create user missing required fields");
            Err(ApiError::Validation(REQUIRED_FIELDS))
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
