use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Default bind address for the webhook listener.
pub const DEFAULT_BIND: &str = "0.0.0.0";
/// Default per-step timeout applied to processor actions and send calls.
pub const DEFAULT_STEP_TIMEOUT_MS: u64 = 30_000;

/// Top-level config (bridgebot.toml + BRIDGEBOT_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Public base URL that adaptor webhook paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Local address the webhook listener binds to. The port comes from
    /// the base URL (explicit port, else the scheme default).
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Timeout in milliseconds for each processor action and send call.
    #[serde(default = "default_step_timeout_ms")]
    pub step_timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bind: default_bind(),
            step_timeout_ms: default_step_timeout_ms(),
        }
    }
}

impl BridgeConfig {
    /// Load config from a TOML file with BRIDGEBOT_* env var overrides.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let path = config_path.unwrap_or("bridgebot.toml");

        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("BRIDGEBOT_"))
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_step_timeout_ms() -> u64 {
    DEFAULT_STEP_TIMEOUT_MS
}

/// A validated base URL: http(s) only, path stored without trailing
/// slashes so route nesting and webhook joining stay predictable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parse and validate a base URL.
    ///
    /// Scheme-less input ("bridge.example.com") is retried with an
    /// `https://` prefix. Anything that ends up with a scheme other than
    /// http/https is rejected.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut url = match Url::parse(input) {
            Ok(url) => url,
            Err(_) => {
                Url::parse(&format!("https://{input}")).map_err(|e| ConfigError::InvalidBaseUrl {
                    url: input.to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::UnsupportedScheme {
                    scheme: other.to_string(),
                })
            }
        }

        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);

        Ok(Self(url))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// The mount path for the HTTP router ("" when serving at the root).
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// Port to bind: explicit port from the URL, else the scheme default.
    pub fn port(&self) -> u16 {
        self.0.port_or_known_default().unwrap_or(80)
    }

    /// The webhook callback URL for an adaptor id: the id resolved as a
    /// relative path against the base with a guaranteed trailing slash.
    pub fn webhook_url(&self, adaptor_id: &str) -> Result<Url, ConfigError> {
        let mut base = self.0.clone();
        base.set_path(&format!("{}/", base.path().trim_end_matches('/')));
        base.join(adaptor_id).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.0.to_string(),
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_host_defaults_to_https() {
        let base = BaseUrl::parse("bridge.example.com").unwrap();
        assert_eq!(base.as_url().scheme(), "https");
        assert_eq!(base.as_url().host_str(), Some("bridge.example.com"));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = BaseUrl::parse("ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let base = BaseUrl::parse("https://example.com/hooks///").unwrap();
        assert_eq!(base.path(), "/hooks");
    }

    #[test]
    fn webhook_url_joins_with_trailing_slash() {
        let base = BaseUrl::parse("https://example.com/hooks").unwrap();
        let url = base.webhook_url("telegram").unwrap();
        assert_eq!(url.as_str(), "https://example.com/hooks/telegram");
    }

    #[test]
    fn webhook_url_at_root() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        let url = base.webhook_url("tg").unwrap();
        assert_eq!(url.as_str(), "https://example.com/tg");
    }

    #[test]
    fn port_falls_back_to_scheme_default() {
        assert_eq!(BaseUrl::parse("http://example.com").unwrap().port(), 80);
        assert_eq!(BaseUrl::parse("https://example.com").unwrap().port(), 443);
        assert_eq!(BaseUrl::parse("http://example.com:9000").unwrap().port(), 9000);
    }

    #[test]
    fn config_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.step_timeout_ms, DEFAULT_STEP_TIMEOUT_MS);
        BaseUrl::parse(&config.base_url).unwrap();
    }
}
