use thiserror::Error;

/// Construction-time configuration failures. These are fatal and surface
/// synchronously to the caller configuring the system.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid scheme '{scheme}': only http and https are supported")]
    UnsupportedScheme { scheme: String },

    #[error("Configuration error: {0}")]
    Load(String),
}
