/// VetClinic: web backend for a veterinary clinic management site
///
/// Main entry point. Resolves the effective configuration once (CLI
/// argument, environment variables, .env file) and starts the HTTP server.

use vetclinic::{config::Settings, server::start_server};

/// Application entry point
///
/// The first CLI argument selects the environment mode (dev/test/prod).
/// The server provides:
/// - Entity CRUD under /api/*
/// - Landing page at /
/// - Health check at /api/health
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve settings before serving anything; configuration errors are fatal
    let settings = Settings::resolve(None)?;

    // Start the server
    start_server(settings).await?;

    Ok(())
}
