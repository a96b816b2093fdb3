/// User CRUD endpoints for the two variants: clinic staff and clients
///
/// Passwords arrive in plain text on creation, are checked against the
/// strength rule, hashed with bcrypt and only then persisted. Token
/// issuance is not implemented here.

use crate::api::AppState;
use crate::domain::{Client, ClientCreate, ClientUpdate, Staff, StaffCreate, StaffUpdate};
use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Routes for staff and client management
pub fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/staff", post(create_staff))
        .route("/api/users/staff", get(list_staff))
        .route("/api/users/staff/{id}", get(get_staff))
        .route("/api/users/staff/{id}", put(update_staff))
        .route("/api/users/staff/{id}", delete(delete_staff))
        .route("/api/users/clients", post(create_client))
        .route("/api/users/clients", get(list_clients))
        .route("/api/users/clients/{id}", get(get_client))
        .route("/api/users/clients/{id}", put(update_client))
        .route("/api/users/clients/{id}", delete(delete_client))
}

#[derive(Debug, Deserialize)]
struct ListStaffQuery {
    clinic_id: Option<i64>,
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hashing failed: {}", e)))
}

/// POST /api/users/staff
async fn create_staff(
    State(state): State<AppState>,
    Json(payload): Json<StaffCreate>,
) -> Result<Json<Staff>, ApiError> {
    payload.validate()?;

    if state.clinics.get(payload.staff.clinic_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "clinic {}",
            payload.staff.clinic_id
        )));
    }
    if state.users.staff_email_taken(&payload.staff.user.email).await? {
        return Err(ApiError::Conflict("email is already registered".to_string()));
    }

    let hashed = hash_password(&payload.password)?;
    let staff = state.users.create_staff(&payload.staff, &hashed).await?;
    tracing::info!(
        "👩‍⚕️ Created staff member: {} ({})",
        staff.id,
        staff.staff.role.as_str()
    );

    Ok(Json(staff))
}

/// GET /api/users/staff?clinic_id=1
async fn list_staff(
    State(state): State<AppState>,
    Query(query): Query<ListStaffQuery>,
) -> Result<Json<Value>, ApiError> {
    let staff = state.users.list_staff(query.clinic_id).await?;
    Ok(Json(json!({ "staff": staff })))
}

/// GET /api/users/staff/:id
async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Staff>, ApiError> {
    let staff = state
        .users
        .get_staff(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("staff {}", id)))?;

    Ok(Json(staff))
}

/// PUT /api/users/staff/:id
///
/// The client role stays rejected on updates as well.
async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<StaffUpdate>,
) -> Result<Json<Staff>, ApiError> {
    patch.validate()?;

    let staff = state
        .users
        .update_staff(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("staff {}", id)))?;

    Ok(Json(staff))
}

/// DELETE /api/users/staff/:id
async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.users.delete_staff(id).await? {
        return Err(ApiError::NotFound(format!("staff {}", id)));
    }

    Ok(Json(json!({ "message": "Staff member deleted successfully" })))
}

/// POST /api/users/clients
async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<ClientCreate>,
) -> Result<Json<Client>, ApiError> {
    payload.validate()?;

    if state.users.client_email_taken(&payload.client.user.email).await? {
        return Err(ApiError::Conflict("email is already registered".to_string()));
    }

    let hashed = hash_password(&payload.password)?;
    let client = state.users.create_client(&payload.client, &hashed).await?;
    tracing::info!("🐾 Registered client: {}", client.id);

    Ok(Json(client))
}

/// GET /api/users/clients
async fn list_clients(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let clients = state.users.list_clients().await?;
    Ok(Json(json!({ "clients": clients })))
}

/// GET /api/users/clients/:id
async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Client>, ApiError> {
    let client = state
        .users
        .get_client(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("client {}", id)))?;

    Ok(Json(client))
}

/// PUT /api/users/clients/:id
async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ClientUpdate>,
) -> Result<Json<Client>, ApiError> {
    let client = state
        .users
        .update_client(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("client {}", id)))?;

    Ok(Json(client))
}

/// DELETE /api/users/clients/:id
async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.users.delete_client(id).await? {
        return Err(ApiError::NotFound(format!("client {}", id)));
    }

    Ok(Json(json!({ "message": "Client deleted successfully" })))
}
