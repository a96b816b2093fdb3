/// News CRUD endpoints

use crate::api::AppState;
use crate::domain::{News, NewsCreate, NewsUpdate};
use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Routes for news management
pub fn create_news_routes() -> Router<AppState> {
    Router::new()
        .route("/api/news", post(create_news))
        .route("/api/news", get(list_news))
        .route("/api/news/{id}", get(get_news))
        .route("/api/news/{id}", put(update_news))
        .route("/api/news/{id}", delete(delete_news))
}

#[derive(Debug, Deserialize)]
struct ListNewsQuery {
    #[serde(default)]
    published: bool,
}

/// POST /api/news
async fn create_news(
    State(state): State<AppState>,
    Json(payload): Json<NewsCreate>,
) -> Result<Json<News>, ApiError> {
    payload.validate()?;

    if state.users.get_staff(payload.author_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("staff {}", payload.author_id)));
    }

    let news = state.news.create(&payload).await?;
    tracing::info!(
        "📰 Created news: {} ({}) with {} blocks",
        news.id,
        news.title,
        news.blocks.len()
    );

    Ok(Json(news))
}

/// GET /api/news?published=true
async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ListNewsQuery>,
) -> Result<Json<Value>, ApiError> {
    let news = state.news.list(query.published).await?;
    Ok(Json(json!({ "news": news })))
}

/// GET /api/news/:id
async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<News>, ApiError> {
    let news = state
        .news
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("news {}", id)))?;

    Ok(Json(news))
}

/// PUT /api/news/:id
async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<NewsUpdate>,
) -> Result<Json<News>, ApiError> {
    let news = state
        .news
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("news {}", id)))?;

    tracing::info!("📰 Updated news: {}", id);
    Ok(Json(news))
}

/// DELETE /api/news/:id
///
/// Deleting an article also removes the blocks it owns.
async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.news.delete(id).await? {
        return Err(ApiError::NotFound(format!("news {}", id)));
    }

    Ok(Json(json!({ "message": "News deleted successfully" })))
}
