use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::dto::CredentialsRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

use super::{device_tag, session_response};

/// Handler for POST /api/v1/auth/signup
///
/// Creates the account and opens its first session.
///
/// # Request Body
///
/// ```json
/// { "id": "alice@example.com", "password": "correct horse" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// Token pair in the body; the refresh token is also set as the
/// `refreshToken` cookie.
///
/// ## Errors
/// - 400 Bad Request: malformed id or password out of bounds
/// - 409 Conflict: id already registered
/// - 503 Service Unavailable: storage failure
pub async fn signup(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    if let Err(error) = state.accounts.sign_up(&request.id, &request.password).await {
        return handle_domain_error(&error);
    }

    match state.sessions.issue(&request.id, device_tag(&req)).await {
        Ok(pair) => {
            info!(user_id = %request.id, "Signed up");
            session_response(StatusCode::CREATED, "User created successfully", &pair, &state)
        }
        Err(error) => handle_domain_error(&error),
    }
}
