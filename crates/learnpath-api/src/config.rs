//! API configuration.

use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second, per client IP
    pub rate_limit_rps: u32,
    /// Rate limit burst
    pub rate_limit_burst: u32,
    /// Request timeout
    pub request_timeout: Duration,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 5,
            rate_limit_burst: 10,
            // One run can fan out to a dozen searches plus a model call
            request_timeout: Duration::from_secs(60),
            max_body_size: 64 * 1024,
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: parse_env("API_PORT").unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: parse_env("RATE_LIMIT_RPS")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.rate_limit_rps),
            rate_limit_burst: parse_env("RATE_LIMIT_BURST")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.rate_limit_burst),
            request_timeout: parse_env("REQUEST_TIMEOUT")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_body_size: parse_env("MAX_BODY_SIZE").unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "API_HOST",
        "API_PORT",
        "CORS_ORIGINS",
        "RATE_LIMIT_RPS",
        "RATE_LIMIT_BURST",
        "REQUEST_TIMEOUT",
        "MAX_BODY_SIZE",
        "ENVIRONMENT",
    ];

    fn clear() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear();
        let config = ApiConfig::from_env();
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert!(!config.is_production());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear();
        std::env::set_var("API_PORT", "9100");
        std::env::set_var("CORS_ORIGINS", "https://a.example, https://b.example,");
        std::env::set_var("RATE_LIMIT_RPS", "0");
        std::env::set_var("ENVIRONMENT", "Production");

        let config = ApiConfig::from_env();
        assert_eq!(config.port, 9100);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.rate_limit_rps, 5);
        assert!(config.is_production());
        clear();
    }
}
