use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::{FileActionResponse, FileNameQuery};
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

use super::file_upload;

/// Handler for POST /api/v1/files/upload?name=report.pdf
///
/// The request body is the file content; `Content-Type` is stored as its
/// mime type. Bodies above `MAX_UPLOAD_BYTES` are refused with 413.
///
/// ## Errors
/// - 400 Bad Request: empty body or missing name
/// - 503 Service Unavailable: storage failure
pub async fn upload(
    req: HttpRequest,
    state: web::Data<AppState>,
    _auth: AuthContext,
    query: web::Query<FileNameQuery>,
    body: web::Bytes,
) -> HttpResponse {
    match state.files.upload(file_upload(&req, &query, body)).await {
        Ok(record) => HttpResponse::Created().json(FileActionResponse {
            message: "File uploaded successfully".to_string(),
            file: record.into(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/v1/files/update/{id}?name=report-v2.pdf
///
/// Replaces content and metadata; the id stays the same.
pub async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<Uuid>,
    query: web::Query<FileNameQuery>,
    body: web::Bytes,
) -> HttpResponse {
    let id = path.into_inner();

    match state.files.replace(id, file_upload(&req, &query, body)).await {
        Ok(record) => HttpResponse::Ok().json(FileActionResponse {
            message: "File updated successfully".to_string(),
            file: record.into(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
