/// Specialist CRUD endpoints

use crate::api::AppState;
use crate::domain::{Specialist, SpecialistCreate, SpecialistUpdate};
use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Routes for specialist management
pub fn create_specialist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/specialists", post(create_specialist))
        .route("/api/specialists", get(list_specialists))
        .route("/api/specialists/{id}", get(get_specialist))
        .route("/api/specialists/{id}", put(update_specialist))
        .route("/api/specialists/{id}", delete(delete_specialist))
}

#[derive(Debug, Deserialize)]
struct ListSpecialistsQuery {
    clinic_id: Option<i64>,
}

/// POST /api/specialists
async fn create_specialist(
    State(state): State<AppState>,
    Json(payload): Json<SpecialistCreate>,
) -> Result<Json<Specialist>, ApiError> {
    payload.validate()?;

    if state.clinics.get(payload.clinic_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("clinic {}", payload.clinic_id)));
    }

    let specialist = state.specialists.create(&payload).await?;
    tracing::info!(
        "🩺 Created specialist: {} ({} {})",
        specialist.id,
        specialist.specialist.first_name,
        specialist.specialist.last_name
    );

    Ok(Json(specialist))
}

/// GET /api/specialists?clinic_id=1
async fn list_specialists(
    State(state): State<AppState>,
    Query(query): Query<ListSpecialistsQuery>,
) -> Result<Json<Value>, ApiError> {
    let specialists = state.specialists.list(query.clinic_id).await?;
    Ok(Json(json!({ "specialists": specialists })))
}

/// GET /api/specialists/:id
async fn get_specialist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Specialist>, ApiError> {
    let specialist = state
        .specialists
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("specialist {}", id)))?;

    Ok(Json(specialist))
}

/// PUT /api/specialists/:id
async fn update_specialist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<SpecialistUpdate>,
) -> Result<Json<Specialist>, ApiError> {
    let specialist = state
        .specialists
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("specialist {}", id)))?;

    tracing::info!("🩺 Updated specialist: {}", id);
    Ok(Json(specialist))
}

/// DELETE /api/specialists/:id
async fn delete_specialist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.specialists.delete(id).await? {
        return Err(ApiError::NotFound(format!("specialist {}", id)));
    }

    Ok(Json(json!({ "message": "Specialist deleted successfully" })))
}
