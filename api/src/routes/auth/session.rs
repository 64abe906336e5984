use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::{InfoResponse, SessionListResponse, SessionResponse};
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/sessions
///
/// Active refresh tokens of the caller, newest first.
pub async fn sessions(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.sessions.active_sessions(&auth.subject).await {
        Ok(entries) => HttpResponse::Ok().json(SessionListResponse {
            sessions: entries.into_iter().map(SessionResponse::from).collect(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/auth/info
pub async fn info(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.accounts.profile(&auth.subject).await {
        Ok(user) => HttpResponse::Ok().json(InfoResponse { user: user.into() }),
        Err(error) => handle_domain_error(&error),
    }
}
