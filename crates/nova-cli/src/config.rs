use anyhow::{Context, Result};
use nova::auth::{Anonymous, AuthProvider, SessionFile, StaticToken, Token};
use nova::configs::{TransportConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use nova::geolocation::{Coordinates, DeniedLocation, FixedLocation, Geolocator, NoGeolocation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "NOVA_BASE_URL";
pub const ENV_TOKEN: &str = "NOVA_TOKEN";
pub const DEFAULT_ASSISTANT_NAME: &str = "Nova X";

/// Contents of `~/.config/nova/config.yaml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub assistant_name: String,
    pub token: Option<String>,
    pub session_file: Option<PathBuf>,
    pub location: Option<Coordinates>,
    pub location_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            token: None,
            session_file: None,
            location: None,
            location_enabled: true,
        }
    }
}

/// Values given on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

pub fn config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home_dir.join(".config").join("nova").join("config.yaml"))
}

impl Config {
    /// A missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// File, then environment, then flags; later sources win.
    pub fn resolve(path: &Path, overrides: Overrides) -> Result<Self> {
        Ok(Self::load(path)?
            .with_env(|key| std::env::var(key).ok())
            .with_overrides(overrides))
    }

    pub fn with_env<F: Fn(&str) -> Option<String>>(mut self, lookup: F) -> Self {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        self
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(token) = overrides.token {
            self.token = Some(token);
        }
        self
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::new(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// An explicit token beats a session file; with neither, requests go out
    /// anonymously.
    pub fn auth_provider(&self) -> Arc<dyn AuthProvider> {
        match (&self.token, &self.session_file) {
            (Some(token), _) => Arc::new(StaticToken::new(Token::new(token.clone()))),
            (None, Some(path)) => Arc::new(SessionFile::new(path.clone())),
            (None, None) => Arc::new(Anonymous),
        }
    }

    pub fn geolocator(&self) -> Arc<dyn Geolocator> {
        if !self.location_enabled {
            return Arc::new(DeniedLocation);
        }
        match self.location {
            Some(coordinates) => Arc::new(FixedLocation(coordinates)),
            None => Arc::new(NoGeolocation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova::errors::GeolocationError;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout_secs, 600);
        assert_eq!(config.assistant_name, "Nova X");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "base_url: https://nova.example.com\nlocation:\n  latitude: 48.85\n  longitude: 2.35\n",
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.base_url, "https://nova.example.com");
        assert_eq!(config.location, Some(Coordinates::new(48.85, 2.35)));
        assert_eq!(config.timeout_secs, 600);
        assert!(config.location_enabled);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "timeout_secs: [not, a, number]\n");
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config file"));
    }

    #[test]
    fn test_precedence_flag_over_env_over_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "base_url: http://file\ntoken: file-token\n");
        let env: HashMap<&str, &str> = [(ENV_BASE_URL, "http://env")].into_iter().collect();

        let config = Config::load(&path)
            .unwrap()
            .with_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.base_url, "http://env");
        assert_eq!(config.token.as_deref(), Some("file-token"));

        let config = config.with_overrides(Overrides {
            base_url: Some("http://flag".into()),
            token: None,
        });
        assert_eq!(config.base_url, "http://flag");
        assert_eq!(config.token.as_deref(), Some("file-token"));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = Config::default().with_env(|_| Some(String::new()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_transport_uses_timeout() {
        let config = Config {
            timeout_secs: 30,
            ..Config::default()
        };
        assert_eq!(config.transport().timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_geolocator_selection() {
        let disabled = Config {
            location: Some(Coordinates::new(1.0, 2.0)),
            location_enabled: false,
            ..Config::default()
        };
        assert_eq!(
            disabled.geolocator().locate().await,
            Err(GeolocationError::PermissionDenied)
        );

        assert_eq!(
            Config::default().geolocator().locate().await,
            Err(GeolocationError::Unsupported)
        );

        let fixed = Config {
            location: Some(Coordinates::new(1.0, 2.0)),
            ..Config::default()
        };
        assert_eq!(fixed.geolocator().locate().await, Ok(Coordinates::new(1.0, 2.0)));
    }

    #[tokio::test]
    async fn test_auth_provider_selection() {
        let config = Config {
            token: Some("abc".into()),
            session_file: Some(PathBuf::from("/unused")),
            ..Config::default()
        };
        let token = config.auth_provider().get_token().await.unwrap();
        assert_eq!(token, Some(Token::new("abc")));

        let token = Config::default().auth_provider().get_token().await.unwrap();
        assert_eq!(token, None);
    }
}
