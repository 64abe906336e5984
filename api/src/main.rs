use actix_web::{web, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tg_api::{create_app, AppState, Stores};
use tg_core::{Clock, SystemClock, TokenCleanupService};
use tg_infra::{DatabasePool, DiskObjectStore};
use tg_shared::{AppConfig, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting Tollgate API server");

    if config.auth.jwt.is_using_default_secret() && !config.environment.is_development() {
        warn!("JWT_SECRET is not set; tokens are signed with the development placeholder");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let (stores, database) = if config.database.is_memory() {
        warn!("Using in-memory storage; all data is lost on shutdown");
        (Stores::in_memory(), None)
    } else {
        let database = DatabasePool::new(config.database.clone()).await?;
        database.migrate().await?;

        let objects = DiskObjectStore::open(config.storage.upload_dir.clone()).await?;
        info!(upload_dir = %objects.root().display(), "File payloads stored on disk");

        let stores = Stores::mysql(&database, Arc::new(objects));
        (stores, Some(database))
    };

    let cleanup = Arc::new(TokenCleanupService::new(
        Arc::clone(&stores.ledger),
        Arc::clone(&stores.revocations),
        Arc::clone(&clock),
        (&config.storage.cleanup).into(),
    ));
    let cleanup_task = cleanup.start_background_task();

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let mut state = AppState::new(config, &stores, clock)?;
    if let Some(database) = &database {
        state = state.with_database(database.clone());
    }
    let state = web::Data::new(state);

    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }
    server.bind(&bind_address)?.run().await?;

    info!("Server stopped");

    if let Some(task) = cleanup_task {
        task.abort();
    }
    if let Some(database) = database {
        database.close().await;
    }

    Ok(())
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` has already been folded into `logging.level`; an unparsable
/// filter falls back to `info`.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Full => builder.init(),
    }
}
