//! Integration tests for the authentication endpoints

mod common;

use actix_web::{
    cookie::time::Duration as CookieDuration,
    http::{header, StatusCode},
    test,
};
use chrono::Duration;
use serde_json::{json, Value};

use common::{
    bearer, refresh_cookie, refresh_request, signin_request, signup_request, tokens, TestContext,
    PASSWORD, USER_ID,
};
use tg_api::create_app;

#[actix_web::test]
async fn test_signup_returns_tokens_and_sets_cookie() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let cookie = refresh_cookie(&resp).expect("refresh cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["expiresIn"], 600);
    let (_, refresh) = tokens(&body);
    assert_eq!(cookie.value(), refresh);
}

#[actix_web::test]
async fn test_signup_conflict_and_validation() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "USER_ALREADY_EXISTS");

    let resp = test::call_service(&app, signup_request("not an identity").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_signin_rejects_bad_credentials_uniformly() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    test::call_service(&app, signup_request(USER_ID).to_request()).await;

    for req in [
        signin_request(USER_ID, "wrong-password", None),
        signin_request("bob@example.com", PASSWORD, None),
    ] {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "INVALID_CREDENTIALS");
        assert_eq!(body["message"], "Invalid credentials");
    }

    let resp = test::call_service(&app, signin_request(USER_ID, PASSWORD, None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_info_requires_valid_access_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let (access, refresh) = tokens(&test::read_body_json(resp).await);

    let req = test::TestRequest::get().uri("/api/v1/auth/info").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "MISSING_TOKEN");

    // A refresh token is not an access token
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/info")
        .insert_header(bearer(&refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_TOKEN");

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/info")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], USER_ID);
    assert!(body["user"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn test_refresh_rotates_and_detects_reuse() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let (_, first_refresh) = tokens(&test::read_body_json(resp).await);

    let resp = test::call_service(&app, refresh_request(&first_refresh).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = refresh_cookie(&resp).expect("rotated cookie");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "New tokens generated");
    let (access, second_refresh) = tokens(&body);
    assert_ne!(second_refresh, first_refresh);
    assert_eq!(cookie.value(), second_refresh);

    // Replaying the rotated token fails even though it has not expired
    let resp = test::call_service(&app, refresh_request(&first_refresh).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "REFRESH_REVOKED_OR_UNKNOWN");

    // The cookie is preferred over the body
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(cookie)
        .set_json(json!({ "refreshToken": first_refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/info")
        .insert_header(bearer(&access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_authorization_header_forms() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let (access, _) = tokens(&test::read_body_json(resp).await);

    for value in [
        format!("Basic {}", access),
        format!("bearer {}", access),
        "Bearer ".to_string(),
    ] {
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/info")
            .insert_header((header::AUTHORIZATION, value))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "MISSING_TOKEN");
    }

    // Surrounding whitespace is tolerated and the bare token reaches logout-all
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout-all")
        .insert_header((header::AUTHORIZATION, format!("Bearer  {} ", access)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/info")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_REVOKED");
}

#[actix_web::test]
async fn test_refresh_without_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/refresh").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "MISSING_TOKEN");

    let resp = test::call_service(&app, refresh_request("garbage").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_TOKEN");
}

#[actix_web::test]
async fn test_device_tag_survives_rotation() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    test::call_service(&app, signup_request(USER_ID).to_request()).await;

    let resp = test::call_service(
        &app,
        signin_request(USER_ID, PASSWORD, Some("laptop")).to_request(),
    )
    .await;
    let (_, refresh) = tokens(&test::read_body_json(resp).await);

    let resp = test::call_service(&app, refresh_request(&refresh).to_request()).await;
    let (access, _) = tokens(&test::read_body_json(resp).await);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/sessions")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let sessions = body["sessions"].as_array().unwrap();
    // The sign-up session and the rotated sign-in session
    assert_eq!(sessions.len(), 2);
    let tagged: Vec<&Value> = sessions
        .iter()
        .filter(|s| s["deviceTag"] == "laptop")
        .collect();
    assert_eq!(tagged.len(), 1);
}

#[actix_web::test]
async fn test_logout_revokes_both_tokens() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let (access, refresh) = tokens(&test::read_body_json(resp).await);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&access))
        .set_json(json!({ "refreshToken": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cleared = refresh_cookie(&resp).expect("removal cookie");
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age(), Some(CookieDuration::ZERO));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["refreshRevoked"], true);
    assert_eq!(body["accessRevoked"], true);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/info")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_REVOKED");

    let resp = test::call_service(&app, refresh_request(&refresh).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "REFRESH_REVOKED_OR_UNKNOWN");

    // Logging out again is harmless
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&access))
        .set_json(json!({ "refreshToken": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["refreshRevoked"], false);
}

#[actix_web::test]
async fn test_logout_without_tokens_succeeds() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["refreshRevoked"], false);
    assert_eq!(body["accessRevoked"], false);
}

#[actix_web::test]
async fn test_access_token_expires_but_refresh_still_rotates() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let (access, refresh) = tokens(&test::read_body_json(resp).await);

    ctx.clock.advance(Duration::minutes(10));

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/info")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_TOKEN");

    let resp = test::call_service(&app, refresh_request(&refresh).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    ctx.clock.advance(Duration::days(7));
    let (_, rotated) = tokens(&test::read_body_json(resp).await);
    let resp = test::call_service(&app, refresh_request(&rotated).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_TOKEN");
}

#[actix_web::test]
async fn test_logout_all_ends_every_session() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, signup_request(USER_ID).to_request()).await;
    let (_, signup_refresh) = tokens(&test::read_body_json(resp).await);
    let resp = test::call_service(
        &app,
        signin_request(USER_ID, PASSWORD, Some("phone")).to_request(),
    )
    .await;
    let (phone_access, phone_refresh) = tokens(&test::read_body_json(resp).await);
    let resp = test::call_service(
        &app,
        signin_request(USER_ID, PASSWORD, Some("tablet")).to_request(),
    )
    .await;
    let (tablet_access, _) = tokens(&test::read_body_json(resp).await);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout-all")
        .insert_header(bearer(&phone_access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["sessionsRevoked"], 3);

    for refresh in [&signup_refresh, &phone_refresh] {
        let resp = test::call_service(&app, refresh_request(refresh).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/info")
        .insert_header(bearer(&phone_access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    // Access tokens other than the presented one run out on their own
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/sessions")
        .insert_header(bearer(&tablet_access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["sessions"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_health_and_unknown_routes() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["backend"], "memory");

    let req = test::TestRequest::get().uri("/api/v1/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
