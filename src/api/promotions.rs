/// Promotion CRUD endpoints

use crate::api::AppState;
use crate::domain::{Promotion, PromotionCreate, PromotionUpdate};
use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Routes for promotion management
pub fn create_promotion_routes() -> Router<AppState> {
    Router::new()
        .route("/api/promotions", post(create_promotion))
        .route("/api/promotions", get(list_promotions))
        .route("/api/promotions/{id}", get(get_promotion))
        .route("/api/promotions/{id}", put(update_promotion))
        .route("/api/promotions/{id}", delete(delete_promotion))
}

#[derive(Debug, Deserialize)]
struct ListPromotionsQuery {
    #[serde(default)]
    active: bool,
}

/// POST /api/promotions
async fn create_promotion(
    State(state): State<AppState>,
    Json(payload): Json<PromotionCreate>,
) -> Result<Json<Promotion>, ApiError> {
    payload.validate()?;

    // A promotion without a clinic applies to all clinics
    if let Some(clinic_id) = payload.clinic_id {
        if state.clinics.get(clinic_id).await?.is_none() {
            return Err(ApiError::NotFound(format!("clinic {}", clinic_id)));
        }
    }

    let promotion = state.promotions.create(&payload).await?;
    tracing::info!("🎁 Created promotion: {} ({})", promotion.id, promotion.promotion.title);

    Ok(Json(promotion))
}

/// GET /api/promotions?active=true
async fn list_promotions(
    State(state): State<AppState>,
    Query(query): Query<ListPromotionsQuery>,
) -> Result<Json<Value>, ApiError> {
    let promotions = state.promotions.list(query.active).await?;
    Ok(Json(json!({ "promotions": promotions })))
}

/// GET /api/promotions/:id
async fn get_promotion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Promotion>, ApiError> {
    let promotion = state
        .promotions
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("promotion {}", id)))?;

    Ok(Json(promotion))
}

/// PUT /api/promotions/:id
async fn update_promotion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<PromotionUpdate>,
) -> Result<Json<Promotion>, ApiError> {
    let promotion = state
        .promotions
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("promotion {}", id)))?;

    tracing::info!("🎁 Updated promotion: {}", id);
    Ok(Json(promotion))
}

/// DELETE /api/promotions/:id
async fn delete_promotion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.promotions.delete(id).await? {
        return Err(ApiError::NotFound(format!("promotion {}", id)));
    }

    Ok(Json(json!({ "message": "Promotion deleted successfully" })))
}
