//! Bearer-token authentication for protected routes.
//!
//! [`JwtAuth`] runs the [`AccessGuard`](tg_core::AccessGuard) from the app
//! state against the `Authorization` header and stores the result as an
//! [`AuthContext`] in the request extensions. Handlers take `AuthContext` as
//! an extractor.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use tracing::debug;

use tg_core::services::token::extract_bearer_token;
use tg_core::{AuthorizedSubject, DomainError, TokenError};

use crate::app::AppState;
use crate::handlers::{handle_domain_error, ApiError};

/// Caller identity injected into authenticated requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Token subject, the user id
    pub subject: String,
    /// `jti` of the presented access token
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
    /// The access token itself, for handlers that revoke it
    pub access_token: String,
}

impl AuthContext {
    fn new(authorized: AuthorizedSubject, access_token: String) -> Self {
        Self {
            subject: authorized.subject,
            token_id: authorized.token_id,
            expires_at: authorized.expires_at,
            access_token,
        }
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    debug!(path = %req.path(), error = %error, "Rejected request");
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Run the access guard from the app state against the request
async fn authenticate(req: &ServiceRequest) -> Result<AuthContext, DomainError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| DomainError::internal("Application state missing"))?;

    let header = authorization_header(req.request());
    let authorized = state.guard.authorize(header).await?;
    let token = header
        .and_then(extract_bearer_token)
        .unwrap_or_default()
        .to_string();

    Ok(AuthContext::new(authorized, token))
}

/// Raw `Authorization` header value, if present and valid ASCII
fn authorization_header(req: &HttpRequest) -> Option<&str> {
    req.headers().get(AUTHORIZATION)?.to_str().ok()
}

/// Bearer token from the `Authorization` header, for handlers that authenticate optionally
pub fn bearer_token_from(req: &HttpRequest) -> Option<String> {
    authorization_header(req)
        .and_then(extract_bearer_token)
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(TokenError::MissingToken).into());

        ready(result)
    }
}
