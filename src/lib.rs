pub mod admin;
pub mod config;
pub mod entities;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seeders;
pub mod services;
pub mod utils;

use axum::Router;
use config::{AppState, Config};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Opens the pool described by `config`.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(config.log_sql);

    Database::connect(opt).await
}

/// Full router with state attached, ready to serve.
pub fn build_app(state: AppState) -> Router {
    routes::create_routes(state.clone()).with_state(state)
}
