//! The `refreshToken` cookie

use actix_web::cookie::{time::Duration, Cookie, SameSite};

pub const REFRESH_COOKIE: &str = "refreshToken";

/// HttpOnly cookie holding a refresh token for `max_age_secs`
pub fn refresh_cookie(token: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token.to_string())
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(Duration::seconds(max_age_secs.max(0)))
        .finish()
}

/// Cookie that makes the client drop the refresh token
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(REFRESH_COOKIE, "")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .finish();
    cookie.make_removal();
    cookie
}
