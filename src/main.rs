use dotenvy::dotenv;
use geoblog::admin::registry::AdminRegistry;
use geoblog::config::{AppState, Config};
use geoblog::services::cache_service::CacheService;
use geoblog::{build_app, connect, seeders};
use migration::{Migrator, MigratorTrait};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cfg = Config::init().expect("🔥 Invalid configuration");

    // RUST_LOG wins over LOG_LEVEL when both are set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("🚀 Starting Geoblog ({:?})...", cfg.environment);

    // 1. Database Connection
    tracing::info!("📡 Connecting to Database...");
    let db = connect(&cfg)
        .await
        .expect("🔥 Failed to connect to Database!");
    tracing::info!("✅ Database Connected!");

    if cfg.run_migrations {
        tracing::info!("🧱 Applying migrations...");
        Migrator::up(&db, None)
            .await
            .expect("🔥 Migrations failed!");
    }

    // 2. Database Seeding
    tracing::info!("🌱 Running Seeders...");
    if let Err(e) = seeders::run_seeders(&db, &cfg).await {
        tracing::error!("❌ Seeding failed: {}", e);
    } else {
        tracing::info!("✅ Seeding Successful!");
    }

    // 3. Page cache
    let cache = CacheService::from_backend(&cfg.cache_backend).await;

    // 4. Build App State
    let addr_str = format!("{}:{}", cfg.server_host, cfg.server_port);
    let state = AppState {
        db,
        cache,
        config: Arc::new(cfg),
        admin: Arc::new(AdminRegistry::default()),
    };

    // 5. Initialize Router
    let app = build_app(state);

    // 6. Start Server
    let addr: SocketAddr = addr_str.parse().expect("Invalid address");
    tracing::info!("🎯 Server ready! Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("🔥 Failed to bind address");
    axum::serve(listener, app).await.expect("🔥 Server error");
}
