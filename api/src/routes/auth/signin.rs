use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use tracing::{debug, info};
use validator::Validate;

use tg_core::{AuthError, DomainError};

use crate::app::AppState;
use crate::dto::CredentialsRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

use super::{device_tag, session_response};

/// Handler for POST /api/v1/auth/signin
///
/// Verifies the credentials and opens a new session tagged with the
/// `X-Device-Id` header, if present. Unknown ids and wrong passwords give
/// the same 401 `INVALID_CREDENTIALS`.
pub async fn signin(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.credentials.verify(&request.id, &request.password).await {
        Ok(true) => {}
        Ok(false) => {
            debug!("Sign-in rejected");
            return handle_domain_error(&DomainError::from(AuthError::InvalidCredentials));
        }
        Err(error) => return handle_domain_error(&error),
    }

    match state.sessions.issue(&request.id, device_tag(&req)).await {
        Ok(pair) => {
            info!(user_id = %request.id, "Signed in");
            session_response(StatusCode::OK, "Signin successful", &pair, &state)
        }
        Err(error) => handle_domain_error(&error),
    }
}
