//! Client configuration

use serde::{Deserialize, Serialize};

use crate::core::errors::{PanlexError, Result};

/// Well-known PanLex API address, without version suffix
pub const DEFAULT_API_URL: &str = "http://api.panlex.org";

/// Environment variable that overrides the full base URL
pub const PANLEX_API_ENV: &str = "PANLEX_API";

/// Maximum array length the service accepts per normalization request
pub const MAX_ARRAY_SIZE: usize = 10_000;

const DEFAULT_MAX_RPS: f64 = 2.0;
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// PanLex API version selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiVersion {
    /// Legacy API, no path suffix
    V1,
    /// Current API, served under `/v2`
    V2,
}

impl ApiVersion {
    /// Path suffix appended to the base address for this version
    pub fn suffix(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "",
            ApiVersion::V2 => "/v2",
        }
    }

    /// Full default base URL for this version
    pub fn base_url(&self) -> String {
        format!("{}{}", DEFAULT_API_URL, self.suffix())
    }
}

/// Configuration for [`PanlexClient`](crate::core::client::PanlexClient)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address requests with a `/`-prefixed endpoint are joined to
    pub base_url: String,
    /// Average outbound calls per second allowed
    pub max_rps: f64,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Chunk ceiling for normalization arrays
    pub max_array_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: ApiVersion::V2.base_url(),
            max_rps: DEFAULT_MAX_RPS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_array_size: MAX_ARRAY_SIZE,
        }
    }
}

impl ClientConfig {
    /// Default configuration for a specific API version
    pub fn for_version(version: ApiVersion) -> Self {
        Self {
            base_url: version.base_url(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `PANLEX_API` replaces the full base URL (version suffix included);
    /// `PANLEX_MAX_RPS` and `PANLEX_TIMEOUT_MS` override the rate and
    /// timeout defaults.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(PANLEX_API_ENV).unwrap_or_else(|_| ApiVersion::V2.base_url());

        let max_rps = std::env::var("PANLEX_MAX_RPS")
            .unwrap_or_else(|_| DEFAULT_MAX_RPS.to_string())
            .parse::<f64>()
            .map_err(|e| PanlexError::Config {
                message: format!("PANLEX_MAX_RPS: {}", e),
            })?;

        let timeout_ms = std::env::var("PANLEX_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|e| PanlexError::Config {
                message: format!("PANLEX_TIMEOUT_MS: {}", e),
            })?;

        Ok(Self {
            base_url,
            max_rps,
            timeout_ms,
            max_array_size: MAX_ARRAY_SIZE,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(PanlexError::Config {
                message: "base_url is required".to_string(),
            });
        }

        if self.max_rps <= 0.0 {
            return Err(PanlexError::Config {
                message: "max_rps must be greater than 0".to_string(),
            });
        }

        if self.max_array_size == 0 {
            return Err(PanlexError::Config {
                message: "max_array_size must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_suffix() {
        assert_eq!(ApiVersion::V1.base_url(), "http://api.panlex.org");
        assert_eq!(ApiVersion::V2.base_url(), "http://api.panlex.org/v2");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "http://api.panlex.org/v2");
        assert_eq!(config.max_array_size, MAX_ARRAY_SIZE);
    }

    #[test]
    fn test_for_version_selects_suffix() {
        let config = ClientConfig::for_version(ApiVersion::V1);
        assert_eq!(config.base_url, "http://api.panlex.org");
    }

    #[test]
    fn test_validation_rejects_bad_rate() {
        let config = ClientConfig {
            max_rps: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var(PANLEX_API_ENV, "http://localhost:3000");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        std::env::remove_var(PANLEX_API_ENV);
    }
}
