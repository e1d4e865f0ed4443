pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::{DatabaseProxy, DbInitError};
use crate::state::AppState;

/// Opens the database named by `config`, applies the schema and builds the
/// full HTTP application.
pub async fn create_app(config: Config) -> Result<axum::Router, DbInitError> {
    let db_proxy = DatabaseProxy::connect(&config.database_url).await?;
    let state = AppState::new(config, Arc::new(db_proxy));
    Ok(build_router(state))
}

pub fn build_router(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
