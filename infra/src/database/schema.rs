//! Table definitions, created at startup with `CREATE TABLE IF NOT EXISTS`

pub const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id VARCHAR(255) NOT NULL PRIMARY KEY,
        password_hash VARCHAR(255) NOT NULL,
        created_at DATETIME(6) NOT NULL
    )
"#;

pub const CREATE_REFRESH_TOKENS: &str = r#"
    CREATE TABLE IF NOT EXISTS refresh_tokens (
        token_id CHAR(36) NOT NULL PRIMARY KEY,
        subject VARCHAR(255) NOT NULL,
        device_tag VARCHAR(255) NULL,
        revoked BOOLEAN NOT NULL DEFAULT FALSE,
        expires_at DATETIME(6) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        INDEX idx_refresh_tokens_subject (subject),
        INDEX idx_refresh_tokens_expires_at (expires_at)
    )
"#;

pub const CREATE_REVOKED_ACCESS_TOKENS: &str = r#"
    CREATE TABLE IF NOT EXISTS revoked_access_tokens (
        token_id CHAR(36) NOT NULL PRIMARY KEY,
        subject VARCHAR(255) NOT NULL,
        expires_at DATETIME(6) NOT NULL,
        revoked_at DATETIME(6) NOT NULL,
        INDEX idx_revoked_access_tokens_subject (subject),
        INDEX idx_revoked_access_tokens_expires_at (expires_at)
    )
"#;

pub const CREATE_FILES: &str = r#"
    CREATE TABLE IF NOT EXISTS files (
        id CHAR(36) NOT NULL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        extension VARCHAR(16) NOT NULL,
        mime_type VARCHAR(255) NULL,
        size BIGINT NOT NULL,
        uploaded_at DATETIME(6) NOT NULL,
        INDEX idx_files_name_id (name, id),
        INDEX idx_files_uploaded_at (uploaded_at)
    )
"#;

/// All tables, in creation order
pub const ALL: [&str; 4] = [
    CREATE_USERS,
    CREATE_REFRESH_TOKENS,
    CREATE_REVOKED_ACCESS_TOKENS,
    CREATE_FILES,
];
