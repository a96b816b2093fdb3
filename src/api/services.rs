/// Service CRUD endpoints

use crate::api::AppState;
use crate::domain::{Service, ServiceCreate, ServiceUpdate};
use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Routes for service management
pub fn create_service_routes() -> Router<AppState> {
    Router::new()
        .route("/api/services", post(create_service))
        .route("/api/services", get(list_services))
        .route("/api/services/{id}", get(get_service))
        .route("/api/services/{id}", put(update_service))
        .route("/api/services/{id}", delete(delete_service))
}

#[derive(Debug, Deserialize)]
struct ListServicesQuery {
    clinic_id: Option<i64>,
}

/// POST /api/services
async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<ServiceCreate>,
) -> Result<Json<Service>, ApiError> {
    payload.validate()?;

    if state.clinics.get(payload.clinic_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("clinic {}", payload.clinic_id)));
    }

    let service = state.services.create(&payload).await?;
    tracing::info!("💉 Created service: {} ({})", service.id, service.service.name);

    Ok(Json(service))
}

/// GET /api/services?clinic_id=1
async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ListServicesQuery>,
) -> Result<Json<Value>, ApiError> {
    let services = state.services.list(query.clinic_id).await?;
    Ok(Json(json!({ "services": services })))
}

/// GET /api/services/:id
async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Service>, ApiError> {
    let service = state
        .services
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("service {}", id)))?;

    Ok(Json(service))
}

/// PUT /api/services/:id
async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ServiceUpdate>,
) -> Result<Json<Service>, ApiError> {
    let service = state
        .services
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("service {}", id)))?;

    tracing::info!("💉 Updated service: {}", id);
    Ok(Json(service))
}

/// DELETE /api/services/:id
async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.services.delete(id).await? {
        return Err(ApiError::NotFound(format!("service {}", id)));
    }

    Ok(Json(json!({ "message": "Service deleted successfully" })))
}
