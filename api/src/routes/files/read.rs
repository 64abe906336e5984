use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::{FileDetailResponse, FileListQuery, FileResponse};
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Handler for GET /api/v1/files/list?page=1&list_size=10
pub async fn list(
    state: web::Data<AppState>,
    _auth: AuthContext,
    query: web::Query<FileListQuery>,
) -> HttpResponse {
    match state.files.list(query.pagination()).await {
        Ok(page) => HttpResponse::Ok().json(page.map(FileResponse::from)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/files/{id}
pub async fn get(
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse {
    match state.files.get(path.into_inner()).await {
        Ok(record) => HttpResponse::Ok().json(FileDetailResponse {
            file: record.into(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/files/download/{id}
///
/// Sends the content as an attachment under its original name.
pub async fn download(
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse {
    match state.files.download(path.into_inner()).await {
        Ok((record, bytes)) => {
            let disposition = ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(record.name.clone())],
            };

            HttpResponse::Ok()
                .content_type(record.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE))
                .insert_header(disposition)
                .body(bytes)
        }
        Err(error) => handle_domain_error(&error),
    }
}
