use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn init_logging() {
    init_logging_default();
}

fn bind_addr(server: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(server.port);
    Ok(format!("{}:{}", server.host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    // DB connection + schema. A failed migration aborts startup; the
    // migrator is a no-op against an already-initialized database.
    let db = models::db::connect(&cfg.database).await?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!("todo schema ready");

    let state = AppState {
        db,
        empty_list_as_not_found: cfg.http.empty_list_as_not_found,
    };
    let cors = routes::build_cors(&cfg.http.cors_allowed_origins);
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting dailydo server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
