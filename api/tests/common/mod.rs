//! Shared setup for the HTTP tests: in-memory stores and a manual clock.

#![allow(dead_code)]

use actix_web::{
    cookie::Cookie,
    dev::ServiceResponse,
    http::header,
    test::TestRequest,
    web,
};
use serde_json::json;
use std::sync::Arc;

use tg_api::{AppState, Stores};
use tg_core::ManualClock;
use tg_shared::{AppConfig, JwtConfig};

pub const USER_ID: &str = "alice@example.com";
pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub stores: Stores,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt = JwtConfig::new("integration-test-secret");
        config.auth.bcrypt_cost = 4;

        let stores = Stores::in_memory();
        let clock = Arc::new(ManualClock::starting_now());
        let state = AppState::new(config, &stores, clock.clone()).unwrap();

        Self {
            state: web::Data::new(state),
            stores,
            clock,
        }
    }
}

pub fn signup_request(id: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({ "id": id, "password": PASSWORD }))
}

pub fn signin_request(id: &str, password: &str, device: Option<&str>) -> TestRequest {
    let req = TestRequest::post()
        .uri("/api/v1/auth/signin")
        .set_json(json!({ "id": id, "password": password }));
    match device {
        Some(device) => req.insert_header(("X-Device-Id", device)),
        None => req,
    }
}

pub fn refresh_request(refresh_token: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refreshToken": refresh_token }))
}

pub fn bearer(access_token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", access_token))
}

/// The `refreshToken` cookie set by a response, if any
pub fn refresh_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "refreshToken")
        .map(|cookie| cookie.into_owned())
}

/// `(access, refresh)` from an auth response body
pub fn tokens(body: &serde_json::Value) -> (String, String) {
    (
        body["accessToken"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}
