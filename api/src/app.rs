//! Application state and factory
//!
//! This module wires the storage backends into the core services and builds
//! the Actix-web application around them.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use tg_core::{
    AccessGuard, AccountService, Clock, CredentialVerifier, DomainResult, FileRepository,
    FileService, InMemoryFileRepository, InMemoryObjectStore, InMemoryRefreshTokenLedger,
    InMemoryRevocationList, InMemoryUserRepository, ObjectStore, RefreshTokenLedger,
    RevocationList, SessionManager, TokenCodec, TokenServiceConfig, UserRepository,
};
use tg_infra::{
    DatabasePool, MySqlFileRepository, MySqlRefreshTokenLedger, MySqlRevocationList,
    MySqlUserRepository,
};
use tg_shared::{error_codes, AppConfig, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::middleware::{create_cors, JwtAuth};
use crate::routes::{auth, files};

/// Storage backends behind the repository traits
#[derive(Clone)]
pub struct Stores {
    pub ledger: Arc<dyn RefreshTokenLedger>,
    pub revocations: Arc<dyn RevocationList>,
    pub users: Arc<dyn UserRepository>,
    pub files: Arc<dyn FileRepository>,
    pub objects: Arc<dyn ObjectStore>,
}

impl Stores {
    /// Process-local storage; contents are lost on restart
    pub fn in_memory() -> Self {
        Self {
            ledger: Arc::new(InMemoryRefreshTokenLedger::new()),
            revocations: Arc::new(InMemoryRevocationList::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            files: Arc::new(InMemoryFileRepository::new()),
            objects: Arc::new(InMemoryObjectStore::new()),
        }
    }

    /// MySQL for records, `objects` for file payloads
    pub fn mysql(database: &DatabasePool, objects: Arc<dyn ObjectStore>) -> Self {
        let pool = database.get_pool().clone();
        Self {
            ledger: Arc::new(MySqlRefreshTokenLedger::new(pool.clone())),
            revocations: Arc::new(MySqlRevocationList::new(pool.clone())),
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            files: Arc::new(MySqlFileRepository::new(pool)),
            objects,
        }
    }
}

/// Services shared by every worker
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub guard: Arc<AccessGuard>,
    pub accounts: Arc<AccountService>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub files: Arc<FileService>,
    pub config: AppConfig,
    /// Present when running against MySQL; reported by `/health`
    pub database: Option<DatabasePool>,
}

impl AppState {
    /// Build the services over `stores`
    ///
    /// Fails only when the token codec rejects the signing configuration.
    pub fn new(config: AppConfig, stores: &Stores, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        let storage_timeout = config.storage.timeout();
        let token_config = TokenServiceConfig::from_settings(&config.auth.jwt, &config.storage);
        let codec = Arc::new(TokenCodec::new(token_config, Arc::clone(&clock))?);

        let sessions = Arc::new(SessionManager::new(
            Arc::clone(&codec),
            Arc::clone(&stores.ledger),
            Arc::clone(&stores.revocations),
            Arc::clone(&stores.users),
        ));
        let guard = Arc::new(AccessGuard::new(codec, Arc::clone(&stores.revocations)));
        let accounts = Arc::new(AccountService::new(
            Arc::clone(&stores.users),
            Arc::clone(&clock),
            config.auth.bcrypt_cost,
            storage_timeout,
        ));
        let files = Arc::new(FileService::new(
            Arc::clone(&stores.files),
            Arc::clone(&stores.objects),
            clock,
            storage_timeout,
        ));

        Ok(Self {
            sessions,
            guard,
            credentials: accounts.clone(),
            accounts,
            files,
            config,
            database: None,
        })
    }

    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let cors = create_cors(app_state.config.environment, &app_state.config.server);
    let json_config = web::JsonConfig::default()
        .limit(app_state.config.server.max_json_payload)
        .error_handler(json_error_handler);
    let payload_config = web::PayloadConfig::new(app_state.config.storage.max_upload_bytes);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .app_data(payload_config)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(auth::signup))
                        .route("/signin", web::post().to(auth::signin))
                        .route("/refresh", web::post().to(auth::refresh))
                        .route("/logout", web::post().to(auth::logout))
                        .route(
                            "/logout-all",
                            web::post().to(auth::logout_all).wrap(JwtAuth::new()),
                        )
                        .route(
                            "/sessions",
                            web::get().to(auth::sessions).wrap(JwtAuth::new()),
                        )
                        .route("/info", web::get().to(auth::info).wrap(JwtAuth::new())),
                )
                .service(
                    web::scope("/files")
                        .wrap(JwtAuth::new())
                        .route("/upload", web::post().to(files::upload))
                        .route("/list", web::get().to(files::list))
                        .route("/download/{id}", web::get().to(files::download))
                        .route("/update/{id}", web::put().to(files::update))
                        .route("/delete/{id}", web::delete().to(files::delete))
                        .route("/{id}", web::get().to(files::get)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// 503 when the database does not answer; in-memory mode is always healthy.
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (healthy, database) = match &state.database {
        None => (true, serde_json::json!({ "backend": "memory" })),
        Some(pool) => {
            let up = pool.health_check().await.unwrap_or(false);
            (
                up,
                serde_json::json!({
                    "backend": "mysql",
                    "status": if up { "up" } else { "down" },
                    "pool": pool.get_statistics(),
                }),
            )
        }
    };

    let mut response = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response.json(serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "service": "tollgate",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
