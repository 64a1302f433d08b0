//! jobdeck API server

use clap::Parser;
use jobdeck_api::{AppState, routes};
use jobdeck_config::{ServiceConfig, load_service_config};
use jobdeck_db::{PgJobStore, create_pool, run_migrations};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobdeck-server")]
#[command(about = "Serves CI job dashboards", long_about = None)]
struct Args {
    /// Path to the KDL configuration file
    #[arg(long, env = "JOBDECK_CONFIG", default_value = "jobdeck.kdl")]
    config: PathBuf,

    /// Apply database migrations before serving
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = if args.config.exists() {
        load_service_config(&args.config)?
    } else {
        info!(path = %args.config.display(), "No configuration file, using defaults");
        ServiceConfig::default()
    };
    let config = config.with_database_url(std::env::var("DATABASE_URL").ok());

    info!("Connecting to database...");
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connected");

    if args.migrate {
        run_migrations(&pool).await?;
        info!("Migrations applied");
    }

    let store = Arc::new(PgJobStore::new(pool, config.database.query_timeout));
    let state = AppState::new(store, config.server.admin_token.clone());

    // Build router
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    info!("Starting server on {}", config.server.listen);

    let listener = TcpListener::bind(config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
