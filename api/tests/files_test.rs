//! Integration tests for the file endpoints

mod common;

use actix_web::{
    http::{header, StatusCode},
    test, web,
};
use serde_json::Value;

use common::{bearer, signup_request, tokens, TestContext, USER_ID};
use tg_api::create_app;

#[actix_web::test]
async fn test_file_lifecycle() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let (access, _) = tokens(&test::read_body_json(resp).await);

    // Upload
    let req = test::TestRequest::post()
        .uri("/api/v1/files/upload?name=notes.txt")
        .insert_header(bearer(&access))
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload("hello")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "File uploaded successfully");
    assert_eq!(body["file"]["name"], "notes.txt");
    assert_eq!(body["file"]["extension"], "txt");
    assert_eq!(body["file"]["mimeType"], "text/plain");
    assert_eq!(body["file"]["size"], 5);
    let id = body["file"]["id"].as_str().unwrap().to_string();

    // List
    let req = test::TestRequest::get()
        .uri("/api/v1/files/list?page=1&list_size=5")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 5);
    assert_eq!(body["items"][0]["id"], id);

    // Metadata
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/files/{}", id))
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["file"]["id"], id);

    // Download
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/files/download/{}", id))
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("notes.txt"));
    assert_eq!(test::read_body(resp).await, web::Bytes::from_static(b"hello"));

    // Update keeps the id
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/files/update/{}?name=notes.md", id))
        .insert_header(bearer(&access))
        .insert_header((header::CONTENT_TYPE, "text/markdown"))
        .set_payload("# changed")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["file"]["id"], id);
    assert_eq!(body["file"]["extension"], "md");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/files/download/{}", id))
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(test::read_body(resp).await, web::Bytes::from_static(b"# changed"));

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/files/delete/{}", id))
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/files/{}", id))
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_files_require_authentication() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/files/list").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "MISSING_TOKEN");

    let req = test::TestRequest::post()
        .uri("/api/v1/files/upload?name=a.txt")
        .insert_header(bearer("not.a.token"))
        .set_payload("data")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_TOKEN");
}

#[actix_web::test]
async fn test_upload_validation() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let (access, _) = tokens(&test::read_body_json(resp).await);

    let req = test::TestRequest::post()
        .uri("/api/v1/files/upload?name=empty.txt")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No file uploaded");

    let req = test::TestRequest::post()
        .uri("/api/v1/files/upload")
        .insert_header(bearer(&access))
        .set_payload("content")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "File name is required");

    // Nothing was stored by the rejected uploads
    let req = test::TestRequest::get()
        .uri("/api/v1/files/list")
        .insert_header(bearer(&access))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0);
}

#[actix_web::test]
async fn test_unknown_file_ids() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let (access, _) = tokens(&test::read_body_json(resp).await);

    for uri in [
        format!("/api/v1/files/{}", uuid::Uuid::new_v4()),
        format!("/api/v1/files/download/{}", uuid::Uuid::new_v4()),
        "/api/v1/files/not-a-uuid".to_string(),
    ] {
        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&access))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}
