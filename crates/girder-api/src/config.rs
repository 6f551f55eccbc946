//! Server configuration.

use serde::{Deserialize, Serialize};

use girder_core::{Error, Result};

/// Default outbound stock-availability endpoint.
pub const DEFAULT_STOCK_URL: &str =
    "https://www.travisperkins.co.uk/graphql?op=tpplcProductCollectionAvailability";

/// Configuration for the Girder API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server port.
    pub http_port: u16,

    /// gRPC server port.
    pub grpc_port: u16,

    /// Enable debug mode (pretty logs instead of JSON).
    pub debug: bool,

    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Stock-availability GraphQL endpoint.
    ///
    /// Overridable so tests and staging can point the lookup at a stub; the
    /// default is the fixed production URL.
    #[serde(default = "default_stock_url")]
    pub stock_url: String,
}

fn default_stock_url() -> String {
    DEFAULT_STOCK_URL.to_string()
}

/// CORS configuration for browser-based access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. Use `["*"]` to allow all origins (development only).
    /// Empty list disables CORS entirely.
    pub allowed_origins: Vec<String>,

    /// Max age for preflight cache (seconds).
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            // Default: disabled (secure-by-default).
            allowed_origins: Vec::new(),
            max_age_seconds: 3600, // 1 hour
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            grpc_port: 9090,
            debug: false,
            cors: CorsConfig::default(),
            stock_url: default_stock_url(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Supported env vars:
    /// - `GIRDER_HTTP_PORT`
    /// - `GIRDER_GRPC_PORT`
    /// - `GIRDER_DEBUG`
    /// - `GIRDER_CORS_ALLOWED_ORIGINS` (comma-separated, or `*`)
    /// - `GIRDER_CORS_MAX_AGE_SECONDS`
    /// - `GIRDER_STOCK_URL`
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable is present but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = env_u16("GIRDER_HTTP_PORT")? {
            config.http_port = port;
        }
        if let Some(port) = env_u16("GIRDER_GRPC_PORT")? {
            config.grpc_port = port;
        }
        if let Some(debug) = env_bool("GIRDER_DEBUG")? {
            config.debug = debug;
        }
        if let Some(origins) = env_string("GIRDER_CORS_ALLOWED_ORIGINS") {
            config.cors.allowed_origins = parse_cors_allowed_origins(&origins);
        }
        if let Some(max_age) = env_u64("GIRDER_CORS_MAX_AGE_SECONDS")? {
            config.cors.max_age_seconds = max_age;
        }
        if let Some(url) = env_string("GIRDER_STOCK_URL") {
            config.stock_url = url;
        }

        Ok(config)
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn env_u16(name: &str) -> Result<Option<u16>> {
    let Some(v) = env_string(name) else {
        return Ok(None);
    };
    v.parse::<u16>()
        .map(Some)
        .map_err(|e| Error::InvalidInput(format!("{name} must be a u16: {e}")))
}

fn env_u64(name: &str) -> Result<Option<u64>> {
    let Some(v) = env_string(name) else {
        return Ok(None);
    };
    v.parse::<u64>()
        .map(Some)
        .map_err(|e| Error::InvalidInput(format!("{name} must be a u64: {e}")))
}

fn env_bool(name: &str) -> Result<Option<bool>> {
    let Some(v) = env_string(name) else {
        return Ok(None);
    };
    parse_bool(name, &v).map(Some)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(Error::InvalidInput(format!(
            "{name} must be a boolean (true/false/1/0)"
        ))),
    }
}

fn parse_cors_allowed_origins(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed == "*" {
        return vec!["*".to_string()];
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_ports() {
        let config = Config::default();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.grpc_port, 9090);
        assert!(!config.debug);
        assert_eq!(config.stock_url, DEFAULT_STOCK_URL);
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn parse_bool_accepts_true_values() {
        assert!(parse_bool("TEST", "true").unwrap());
        assert!(parse_bool("TEST", "1").unwrap());
        assert!(parse_bool("TEST", "yes").unwrap());
        assert!(parse_bool("TEST", "TRUE").unwrap());
    }

    #[test]
    fn parse_bool_accepts_false_values() {
        assert!(!parse_bool("TEST", "false").unwrap());
        assert!(!parse_bool("TEST", "0").unwrap());
        assert!(!parse_bool("TEST", "no").unwrap());
        assert!(!parse_bool("TEST", "FALSE").unwrap());
    }

    #[test]
    fn parse_bool_rejects_invalid_values() {
        assert!(parse_bool("TEST", "maybe").is_err());
        assert!(parse_bool("TEST", "").is_err());
    }

    #[test]
    fn cors_origins_wildcard_is_sole_entry() {
        assert_eq!(parse_cors_allowed_origins("*"), vec!["*".to_string()]);
    }

    #[test]
    fn cors_origins_split_and_trimmed() {
        let origins = parse_cors_allowed_origins(" https://a.example , https://b.example ,, ");
        assert_eq!(
            origins,
            vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ]
        );
    }

    #[test]
    fn cors_origins_empty_input_disables() {
        assert!(parse_cors_allowed_origins("   ").is_empty());
    }
}
