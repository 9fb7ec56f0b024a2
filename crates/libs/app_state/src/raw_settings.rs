use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub media: RawMediaSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub constants: AppConstants,
}

/// Where uploaded photos and profile images are written.
#[derive(Debug, Deserialize, Clone)]
pub struct RawMediaSettings {
    pub media_folder: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    /// Base url used when rendering absolute media urls.
    pub public_url: String,
    /// Largest accepted request body, in bytes. Applies to image uploads.
    pub max_upload_bytes: usize,
    pub rate_limiting: RateLimitingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitingSettings {
    /// Rate limiting keys on the peer address, so the server must provide connect info.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub req_per_second: u64,
    pub burst_size: u32,
}

const fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
    pub database_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConstants {
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
    pub search: SearchConstants,
}

/// Database connection and related configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    pub max_connections: u32,
    pub min_connection: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
    /// Length of the random file name given to stored uploads.
    pub stored_file_name_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConstants {
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConstants {
    /// Restrict `search_by_tags` to the caller's own photos.
    /// Off by default: the search runs over every stored photo.
    #[serde(default)]
    pub owner_scoped_tag_search: bool,
}
