use std::time::Duration;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use kartei_core::health::Readiness;
use kartei_core::tracing::init_tracing;
use kartei_migration::Migrator;

use kartei_web::config::WebConfig;
use kartei_web::domain::repository::SessionRepository as _;
use kartei_web::router::build_router;
use kartei_web::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = WebConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let readiness = Readiness::new();
    let state = AppState {
        db,
        api_key: config.api_key,
        readiness: readiness.clone(),
    };

    // Sweep expired session rows hourly.
    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match sweeper.session_repo().delete_expired().await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "swept expired sessions"),
                Err(error) => warn!(error = %error, "session sweep failed"),
            }
        }
    });

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.web_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    readiness.set_ready();
    info!("web service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
