//! Conversion of domain errors into HTTP responses
//!
//! Token and credential failures all map to 401 with a stable code. The
//! message names the kind of failure and nothing more.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse, ResponseError,
};
use std::fmt;
use tracing::{debug, error};
use validator::ValidationErrors;

use tg_core::{AuthError, DomainError, TokenError};
use tg_shared::{error_codes, ErrorResponse};

/// Seconds a client should wait after a storage failure
const STORAGE_RETRY_AFTER_SECS: u32 = 5;

/// Status code, machine code and client-facing message for an error
fn classify(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Token(token_error) => {
            let code = match token_error {
                TokenError::MissingToken => error_codes::MISSING_TOKEN,
                TokenError::InvalidToken => error_codes::INVALID_TOKEN,
                TokenError::TokenRevoked => error_codes::TOKEN_REVOKED,
                TokenError::RefreshRevokedOrUnknown => error_codes::REFRESH_REVOKED_OR_UNKNOWN,
                TokenError::TokenGenerationFailed => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        error_codes::INTERNAL_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            };
            (StatusCode::UNAUTHORIZED, code, token_error.to_string())
        }
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::UnknownSubject => (
                StatusCode::UNAUTHORIZED,
                error_codes::UNKNOWN_SUBJECT,
                auth_error.to_string(),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_CREDENTIALS,
                auth_error.to_string(),
            ),
            AuthError::UserAlreadyExists => (
                StatusCode::CONFLICT,
                error_codes::USER_ALREADY_EXISTS,
                auth_error.to_string(),
            ),
            AuthError::UserNotFound => (
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
                auth_error.to_string(),
            ),
        },
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            error.to_string(),
        ),
        DomainError::Storage { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::STORAGE_UNAVAILABLE,
            "Storage is temporarily unavailable, please retry".to_string(),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code, message) = classify(error);

    if status.is_server_error() {
        error!(error = %error, status = status.as_u16(), "Request failed");
    } else {
        debug!(error = %error, status = status.as_u16(), "Request rejected");
    }

    let mut response = HttpResponse::build(status);
    if error.is_retryable() {
        response.insert_header((header::RETRY_AFTER, STORAGE_RETRY_AFTER_SECS.to_string()));
    }
    response.json(ErrorResponse::new(code, message))
}

/// 400 response listing the fields that failed validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let field_errors = errors.field_errors();
    let mut fields: Vec<&str> = field_errors.keys().map(|field| field.as_ref()).collect();
    fields.sort_unstable();
    debug!(fields = ?fields, "Request body failed validation");

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request body failed validation")
            .add_detail("fields", fields),
    )
}

/// `JsonConfig` error handler producing the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message));
    InternalError::from_response(err, response).into()
}

/// Domain error usable as an actix `Error`, for middleware and extractors
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        Self(error.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        classify(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}
