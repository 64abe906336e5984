use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use tg_core::{DomainError, TokenError};

use crate::app::AppState;
use crate::dto::RefreshTokenRequest;
use crate::handlers::handle_domain_error;

use super::{presented_refresh_token, session_response};

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the refresh token taken from the `refreshToken` cookie, or from
/// the body when there is no cookie:
///
/// ```json
/// { "refreshToken": "eyJ..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// A new token pair; the cookie is replaced.
///
/// ## Errors
/// - 401 `MISSING_TOKEN`: no refresh token presented
/// - 401 `INVALID_TOKEN`: malformed, expired or not a refresh token
/// - 401 `REFRESH_REVOKED_OR_UNKNOWN`: already rotated, revoked or unknown
/// - 401 `UNKNOWN_SUBJECT`: the account no longer exists
/// - 503 Service Unavailable: storage failure
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse {
    let Some(token) = presented_refresh_token(&req, request.as_deref()) else {
        return handle_domain_error(&DomainError::from(TokenError::MissingToken));
    };

    match state.sessions.rotate(&token).await {
        Ok(pair) => session_response(StatusCode::OK, "New tokens generated", &pair, &state),
        Err(error) => handle_domain_error(&error),
    }
}
