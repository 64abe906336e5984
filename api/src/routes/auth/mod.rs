//! Authentication route handlers
//!
//! - Sign-up and sign-in, each opening a session
//! - Token refresh (rotation)
//! - Logout, single session or all sessions
//! - Session listing and account info

pub mod cookie;
pub mod logout;
pub mod refresh;
pub mod session;
pub mod signin;
pub mod signup;

pub use logout::{logout, logout_all};
pub use refresh::refresh;
pub use session::{info, sessions};
pub use signin::signin;
pub use signup::signup;

use actix_web::{http::StatusCode, HttpRequest, HttpResponse};

use tg_core::TokenPair;

use crate::app::AppState;
use crate::dto::{AuthResponse, RefreshTokenRequest};

use self::cookie::{refresh_cookie, REFRESH_COOKIE};

/// Header carrying the client's device label
pub const DEVICE_ID_HEADER: &str = "x-device-id";

const MAX_DEVICE_TAG_LEN: usize = 128;

/// Device tag from `X-Device-Id`, ignored when blank or oversized
pub fn device_tag(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(DEVICE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && tag.len() <= MAX_DEVICE_TAG_LEN)
        .map(String::from)
}

/// Refresh token from the cookie, falling back to the request body
pub fn presented_refresh_token(
    req: &HttpRequest,
    body: Option<&RefreshTokenRequest>,
) -> Option<String> {
    req.cookie(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| body.and_then(|b| b.refresh_token.clone()))
        .filter(|token| !token.is_empty())
}

/// Token pair response with the refresh cookie set
fn session_response(
    status: StatusCode,
    message: &str,
    pair: &TokenPair,
    state: &AppState,
) -> HttpResponse {
    let now = state.sessions.codec().now();
    let cookie = refresh_cookie(
        pair.refresh_token(),
        pair.refresh_expires_in(now),
        state.config.is_production(),
    );

    HttpResponse::build(status)
        .cookie(cookie)
        .json(AuthResponse::from_pair(message, pair, now))
}
