//! Backend address resolution.
//!
//! The only externally supplied setting is the backend base URL. Resolution order:
//! 1. Explicit override (the `--api-url` flag)
//! 2. `$PREDICTOR_API_URL` environment variable
//! 3. The deployed default endpoint

use url::Url;

use crate::error::ConfigError;

/// Environment variable overriding the default backend address
pub const API_URL_ENV: &str = "PREDICTOR_API_URL";

/// Deployed backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://student-performance-prediction-l7zw.vercel.app/";

const MODEL_INFO_PATH: &str = "model-info";
const PREDICT_PATH: &str = "predict";

/// Resolved backend endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    model_info_url: Url,
    predict_url: Url,
}

impl ClientConfig {
    /// Builds a config from a base URL, normalizing it to end in `/` so that
    /// endpoint paths append rather than replace the last segment.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(invalid(format!(
                "unsupported scheme `{}` (only http/https allowed)",
                base.scheme()
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        let model_info_url = base
            .join(MODEL_INFO_PATH)
            .map_err(|e| invalid(e.to_string()))?;
        let predict_url = base.join(PREDICT_PATH).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            base_url: base,
            model_info_url,
            predict_url,
        })
    }

    /// Resolves the base URL from an optional override and the process environment.
    pub fn resolve(cli_override: Option<&str>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(API_URL_ENV).ok();
        Self::new(select_base_url(cli_override, from_env.as_deref()))
    }

    /// Root endpoint, probed by the health check.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn model_info_url(&self) -> &Url {
        &self.model_info_url
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

fn select_base_url<'a>(cli_override: Option<&'a str>, from_env: Option<&'a str>) -> &'a str {
    [cli_override, from_env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_API_URL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_environment() {
        assert_eq!(
            select_base_url(Some("http://localhost:8000"), Some("http://env:1")),
            "http://localhost:8000"
        );
        assert_eq!(select_base_url(None, Some("http://env:1")), "http://env:1");
        assert_eq!(select_base_url(Some("  "), None), DEFAULT_API_URL);
        assert_eq!(select_base_url(None, None), DEFAULT_API_URL);
    }

    #[test]
    fn endpoints_are_derived_from_base() {
        let config = ClientConfig::new("http://localhost:8000").unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8000/");
        assert_eq!(
            config.model_info_url().as_str(),
            "http://localhost:8000/model-info"
        );
        assert_eq!(config.predict_url().as_str(), "http://localhost:8000/predict");
    }

    #[test]
    fn base_path_prefix_is_preserved() {
        let config = ClientConfig::new("https://example.com/api/v1").unwrap();
        assert_eq!(
            config.predict_url().as_str(),
            "https://example.com/api/v1/predict"
        );
    }

    #[test]
    fn default_points_at_deployed_backend() {
        let config = ClientConfig::new(DEFAULT_API_URL).unwrap();
        assert_eq!(config.base_url().as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            ClientConfig::new("ftp://example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(ClientConfig::new("not a url").is_err());
    }
}
