use std::net::{IpAddr, Ipv4Addr};

use organizer_gemini::api::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`). Script generation
    /// is exempt.
    pub request_timeout_secs: u64,
    /// Start the session with the built-in categories (default: `true`).
    pub seed_default_categories: bool,
    /// Generation service settings.
    pub gemini: GeminiConfig,
}

/// Connection settings for the Gemini generation service.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                      |
    /// |---------------------------|----------------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                                    |
    /// | `PORT`                    | `3000`                                       |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`                      |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                         |
    /// | `SEED_DEFAULT_CATEGORIES` | `true`                                       |
    /// | `GEMINI_API_KEY`          | falls back to `API_KEY`; required            |
    /// | `GEMINI_MODEL`            | `gemini-2.5-flash`                           |
    /// | `GEMINI_BASE_URL`         | `https://generativelanguage.googleapis.com`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_var(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;

        let port = parse_var(&lookup, "PORT", 3000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;

        let seed_default_categories = parse_var(&lookup, "SEED_DEFAULT_CATEGORIES", true)?;

        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let gemini = GeminiConfig {
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            seed_default_categories,
            gemini,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = load(&[("GEMINI_API_KEY", "k")]).unwrap();

        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.seed_default_categories);
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.gemini.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn api_key_falls_back_to_api_key_var() {
        let config = load(&[("API_KEY", "fallback")]).unwrap();
        assert_eq!(config.gemini.api_key, "fallback");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("GEMINI_API_KEY")));
        assert_matches!(
            load(&[("GEMINI_API_KEY", "  ")]),
            Err(ConfigError::Missing(_))
        );
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = load(&[("GEMINI_API_KEY", "k"), ("PORT", "http")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "PORT", .. });
        assert!(err.to_string().contains("'http'"));
    }

    #[test]
    fn host_must_be_an_ip_address() {
        let err = load(&[("GEMINI_API_KEY", "k"), ("HOST", "localhost")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "HOST", .. });

        let config = load(&[("GEMINI_API_KEY", "k"), ("HOST", " ::1 ")]).unwrap();
        assert_eq!(config.host, "::1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[
            ("GEMINI_API_KEY", "k"),
            ("CORS_ORIGINS", "http://a.test, ,http://b.test "),
            ("SEED_DEFAULT_CATEGORIES", "false"),
        ])
        .unwrap();

        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert!(!config.seed_default_categories);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = load(&[("GEMINI_API_KEY", "super-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
