/// Server setup and initialization
///
/// Wires together all components: database pool, per-entity stores and HTTP
/// routes. Settings are resolved before this point and never change while
/// the server runs.

use crate::{
    api::{
        create_clinic_routes, create_news_routes, create_page_routes, create_promotion_routes,
        create_service_routes, create_specialist_routes, create_user_routes, AppState,
    },
    config::Settings,
    storage::{ClinicStore, NewsStore, PromotionStore, ServiceStore, SpecialistStore, UserStore},
};
use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

/// Create the main Axum application with all routes
///
/// Connects the pool, runs the idempotent schema setup in dependency order
/// and builds the router over one shared application state.
pub async fn create_app(settings: Settings) -> Result<Router> {
    tracing::info!("🗄️ Connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&settings.database_url)
        .await?;

    let clinics = ClinicStore::new(pool.clone());
    let specialists = SpecialistStore::new(pool.clone());
    let services = ServiceStore::new(pool.clone());
    let users = UserStore::new(pool.clone());
    let promotions = PromotionStore::new(pool.clone());
    let news = NewsStore::new(pool.clone());

    // Referenced tables first: clinics, then specialists/services (join
    // table needs both), then users, promotions and news (author reference)
    tracing::info!("📋 Initializing database schema");
    clinics.init_schema().await?;
    specialists.init_schema().await?;
    services.init_schema().await?;
    users.init_schema().await?;
    promotions.init_schema().await?;
    news.init_schema().await?;

    let state = AppState {
        clinics,
        services,
        specialists,
        promotions,
        news,
        users,
        settings,
    };

    tracing::info!("📡 Creating HTTP router with all endpoints");
    let app = Router::new()
        .merge(create_page_routes())
        .merge(create_clinic_routes())
        .merge(create_service_routes())
        .merge(create_specialist_routes())
        .merge(create_promotion_routes())
        .merge(create_news_routes())
        .merge(create_user_routes())
        .with_state(state);

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given settings
///
/// Initializes tracing (statement logging follows the db_echo flag), builds
/// the application and serves it on the configured address.
pub async fn start_server(settings: Settings) -> Result<()> {
    let default_level = if settings.debug { "debug" } else { "info" };
    let sqlx_level = if settings.db_echo { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("{},sqlx={}", default_level, sqlx_level))
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!(
        "Starting VetClinic server ({} mode, debug={})",
        settings.env,
        settings.debug
    );

    let bind_addr = format!("{}:{}", settings.host, settings.port);
    let app = create_app(settings).await?;

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
