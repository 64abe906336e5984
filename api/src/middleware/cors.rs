//! CORS configuration for browser and mobile clients.
//!
//! Development accepts any origin. Other environments accept only the
//! origins listed in `ALLOWED_ORIGINS`, plus the local app schemes.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use tg_shared::{Environment, ServerConfig};

/// Origins used by packaged mobile clients
const APP_ORIGINS: [&str; 3] = [
    "capacitor://localhost",
    "ionic://localhost",
    "http://localhost",
];

/// Creates a CORS middleware instance configured for the current environment.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_development() {
        create_development_cors(server.cors_max_age)
    } else {
        create_production_cors(server)
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

fn allowed_headers() -> Vec<header::HeaderName> {
    vec![
        header::AUTHORIZATION,
        header::ACCEPT,
        header::CONTENT_TYPE,
        header::HeaderName::from_static("x-device-id"),
    ]
}

fn create_development_cors(max_age: usize) -> Cors {
    info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(allowed_headers())
        .expose_headers(vec![header::CONTENT_DISPOSITION, header::RETRY_AFTER])
        .max_age(max_age)
        // The refresh cookie needs credentialed requests
        .supports_credentials()
}

fn create_production_cors(server: &ServerConfig) -> Cors {
    info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(allowed_headers())
        .expose_headers(vec![header::CONTENT_DISPOSITION, header::RETRY_AFTER])
        .max_age(server.cors_max_age)
        .supports_credentials();

    for origin in &server.allowed_origins {
        info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    for origin in APP_ORIGINS {
        cors = cors.allowed_origin(origin);
    }

    cors
}
