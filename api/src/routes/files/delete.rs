use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::MessageResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for DELETE /api/v1/files/delete/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse {
    match state.files.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "File deleted successfully".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
