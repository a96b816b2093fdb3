/// Landing page and health check endpoints

use crate::api::AppState;
use axum::{
    extract::State,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};

/// Routes for the HTML landing page and the health check
pub fn create_page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
}

/// GET / - main page of the veterinary clinic site
async fn index() -> Html<String> {
    Html(render_index(
        "VetClinic",
        "Welcome to our veterinary clinic!",
    ))
}

/// GET /api/health - liveness plus the resolved environment
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "VetClinic API is running",
        "environment": state.settings.env.to_string(),
        "debug": state.settings.debug,
    }))
}

fn render_index(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body>
    <h1>{title} 🐾</h1>
    <p>{message}</p>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_page_carries_title_and_message() {
        let page = render_index("VetClinic", "Welcome!");
        assert!(page.contains("<title>VetClinic</title>"));
        assert!(page.contains("Welcome!"));
    }
}
