//! Request and response bodies

pub mod auth;
pub mod files;

pub use auth::{
    AuthResponse, CredentialsRequest, InfoResponse, LogoutAllResponse, LogoutResponse,
    MessageResponse, RefreshTokenRequest, SessionListResponse, SessionResponse, UserResponse,
};
pub use files::{
    FileActionResponse, FileDetailResponse, FileListQuery, FileNameQuery, FileResponse,
};
