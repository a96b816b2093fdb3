/// Clinic CRUD endpoints

use crate::api::AppState;
use crate::domain::{Clinic, ClinicCreate, ClinicUpdate};
use crate::error::ApiError;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};

/// Routes for clinic management
pub fn create_clinic_routes() -> Router<AppState> {
    Router::new()
        .route("/api/clinics", post(create_clinic))
        .route("/api/clinics", get(list_clinics))
        .route("/api/clinics/{id}", get(get_clinic))
        .route("/api/clinics/{id}", put(update_clinic))
        .route("/api/clinics/{id}", delete(delete_clinic))
}

/// POST /api/clinics
async fn create_clinic(
    State(state): State<AppState>,
    Json(payload): Json<ClinicCreate>,
) -> Result<Json<Clinic>, ApiError> {
    payload.validate()?;

    let clinic = state.clinics.create(&payload).await?;
    tracing::info!("🏥 Created clinic: {} ({})", clinic.id, clinic.clinic.name);

    Ok(Json(clinic))
}

/// GET /api/clinics
async fn list_clinics(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let clinics = state.clinics.list().await?;
    Ok(Json(json!({ "clinics": clinics })))
}

/// GET /api/clinics/:id
async fn get_clinic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Clinic>, ApiError> {
    let clinic = state
        .clinics
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("clinic {}", id)))?;

    Ok(Json(clinic))
}

/// PUT /api/clinics/:id
async fn update_clinic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ClinicUpdate>,
) -> Result<Json<Clinic>, ApiError> {
    let clinic = state
        .clinics
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("clinic {}", id)))?;

    tracing::info!("🏥 Updated clinic: {}", id);
    Ok(Json(clinic))
}

/// DELETE /api/clinics/:id
///
/// Deleting a clinic also removes the specialists and services it owns.
async fn delete_clinic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.clinics.delete(id).await? {
        return Err(ApiError::NotFound(format!("clinic {}", id)));
    }

    tracing::info!("🗑️ Deleted clinic {} with its specialists and services", id);
    Ok(Json(json!({ "message": "Clinic deleted successfully" })))
}
