use actix_web::{web, HttpRequest, HttpResponse};

use crate::app::AppState;
use crate::dto::{LogoutAllResponse, LogoutResponse, RefreshTokenRequest};
use crate::handlers::handle_domain_error;
use crate::middleware::auth::{bearer_token_from, AuthContext};

use super::cookie::removal_cookie;
use super::presented_refresh_token;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the refresh token (cookie or body) and the bearer access token,
/// whichever are present. Tokens that are missing, malformed or already
/// revoked are skipped, so repeated logouts succeed. The refresh cookie is
/// always cleared.
///
/// # Errors
/// - 503 Service Unavailable: storage failure; nothing is reported as revoked
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse {
    let refresh_token = presented_refresh_token(&req, request.as_deref());
    let access_token = bearer_token_from(&req);

    match state
        .sessions
        .revoke(refresh_token.as_deref(), access_token.as_deref())
        .await
    {
        Ok(outcome) => HttpResponse::Ok()
            .cookie(removal_cookie(state.config.is_production()))
            .json(LogoutResponse {
                message: "Logged out successfully".to_string(),
                refresh_revoked: outcome.refresh_revoked,
                access_revoked: outcome.access_revoked,
            }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/auth/logout-all
///
/// Ends every session of the caller and revokes the access token used for
/// this request. Other access tokens stay valid until they expire.
pub async fn logout_all(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    let sessions_revoked = match state.sessions.revoke_all(&auth.subject).await {
        Ok(count) => count,
        Err(error) => return handle_domain_error(&error),
    };

    if let Err(error) = state.sessions.revoke(None, Some(auth.access_token.as_str())).await {
        return handle_domain_error(&error);
    }

    HttpResponse::Ok()
        .cookie(removal_cookie(state.config.is_production()))
        .json(LogoutAllResponse {
            message: "Logged out of all sessions".to_string(),
            sessions_revoked,
        })
}
