use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
pub const DEFAULT_CHART_WIDTH: u32 = 800;
pub const DEFAULT_CHART_HEIGHT: u32 = 450;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub csrf_token: Option<String>,
    pub timeout_secs: u64,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            csrf_token: None,
            timeout_secs: 30,
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("WYCA_BASE_URL").unwrap_or(defaults.base_url),
            csrf_token: std::env::var("WYCA_CSRF_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout_secs: std::env::var("WYCA_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            chart_width: std::env::var("WYCA_CHART_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.chart_width),
            chart_height: std::env::var("WYCA_CHART_HEIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.chart_height),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("WYCA_BASE_URL is not a valid URL ({}): {}", self.base_url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!("WYCA_BASE_URL must be http or https, got {}", url.scheme()));
        }
        if self.timeout_secs == 0 {
            return Err("WYCA_TIMEOUT_SECS must be greater than zero".to_string());
        }
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err("chart dimensions must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Base URL with a trailing slash so relative endpoints resolve under it.
    pub fn base(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = ClientConfig {
            base_url: "ftp://example.com/".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let config = ClientConfig {
            chart_width: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_gets_trailing_slash() {
        let config = ClientConfig {
            base_url: "http://example.com/quiz".to_string(),
            ..ClientConfig::default()
        };
        let base = config.base().unwrap();
        assert_eq!(base.as_str(), "http://example.com/quiz/");
        assert_eq!(base.join("list").unwrap().path(), "/quiz/list");
        assert_eq!(base.join("/data/md").unwrap().path(), "/data/md");
    }
}
