//! File storage route handlers. All of them require a bearer access token.

pub mod delete;
pub mod read;
pub mod upload;

pub use delete::delete;
pub use read::{download, get, list};
pub use upload::{update, upload};

use actix_web::{http::header::CONTENT_TYPE, web, HttpRequest};

use tg_core::FileUpload;

use crate::dto::FileNameQuery;

/// Build a [`FileUpload`] from the raw body, `?name=` and `Content-Type`
fn file_upload(req: &HttpRequest, query: &FileNameQuery, body: web::Bytes) -> FileUpload {
    let mime_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(String::from);

    FileUpload::new(
        query.name.clone().unwrap_or_default(),
        mime_type,
        body.to_vec(),
    )
}
