use anyhow::{Context, Result};
use url::Url;

/// Environment variable holding the backend base URL
pub const API_BASE_URL_ENV: &str = "HABIT_HERO_API_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Location of the user-data and auth backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url =
            Url::parse(trimmed).with_context(|| format!("Invalid API base URL: {}", base_url))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot be used as a base: {}", base_url);
        }

        Ok(Self { base_url })
    }

    /// Read `HABIT_HERO_API_BASE_URL`, falling back to the local backend
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(std::env::var(API_BASE_URL_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Result<Self> {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(url) => Self::new(&url),
            None => Self::new(DEFAULT_API_BASE_URL),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an absolute API path such as `/api/user`
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{}/{}", base, path.trim_start_matches('/'));
        Url::parse(&url).with_context(|| format!("Invalid endpoint URL: {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = ApiConfig::from_env_value(None).unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8000/");
        assert_eq!(
            config.endpoint("/api/user").unwrap().as_str(),
            "http://localhost:8000/api/user"
        );
    }

    #[test]
    fn test_env_value_overrides_default() {
        let config =
            ApiConfig::from_env_value(Some("https://habits.example.com/".to_string())).unwrap();
        assert_eq!(
            config.endpoint("api/auth/me").unwrap().as_str(),
            "https://habits.example.com/api/auth/me"
        );

        let blank = ApiConfig::from_env_value(Some("  ".to_string())).unwrap();
        assert_eq!(blank, ApiConfig::new(DEFAULT_API_BASE_URL).unwrap());
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let config = ApiConfig::new("https://example.com/hero").unwrap();
        assert_eq!(
            config.endpoint("/api/user").unwrap().as_str(),
            "https://example.com/hero/api/user"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiConfig::new("not a url").is_err());
        assert!(ApiConfig::new("mailto:hero@example.com").is_err());
    }
}
