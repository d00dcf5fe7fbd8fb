//! API client configuration — TOML file with defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Where and how to reach the sentiment backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the API prefix, no trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api_v1".into(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Load from a TOML file. Returns defaults if the file is missing or
    /// does not parse.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Override the base URL, trimming any trailing slash.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000/api_v1");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let config = ApiConfig::load(Path::new("/nonexistent/sentifolio/api.toml"));
        assert_eq!(config.base_url, ApiConfig::default().base_url);
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let config: ApiConfig = toml::from_str("base_url = \"http://10.0.0.2:9000/api_v1\"").unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:9000/api_v1");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = std::env::temp_dir().join("sentifolio_config_corrupt");
        let path = dir.join("api.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "base_url = [not toml").unwrap();

        let config = ApiConfig::load(&path);
        assert_eq!(config.base_url, ApiConfig::default().base_url);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn base_url_override_trims_slash() {
        let config = ApiConfig::default().with_base_url("http://host/api_v1/");
        assert_eq!(config.base_url, "http://host/api_v1");
    }
}
