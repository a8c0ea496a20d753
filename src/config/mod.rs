//! Configuration profile for OSA client callers

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::client::models::Credentials;
use crate::error::{ConfigError, Result};

/// Connection profile for a CxRestAPI server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server host URL, e.g. `https://cx.example.com`
    pub host: String,

    /// Login user name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Login password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Per-request timeout in seconds; no timeout when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Create a profile for the given host with no credentials or timeout
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".osa").join("config.yaml"))
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: ClientConfig = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The profile may hold a password
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Validate that the profile names a host
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()).into());
        }
        Ok(())
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build login credentials from the profile
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                Ok(Credentials::new(username.clone(), password.clone()))
            }
            _ => Err(ConfigError::MissingCredentials.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_new_config_has_no_credentials() {
        let config = ClientConfig::new("https://cx.example.com");
        assert_eq!(config.host, "https://cx.example.com");
        assert!(config.timeout().is_none());
        assert!(matches!(
            config.credentials(),
            Err(Error::Config(ConfigError::MissingCredentials))
        ));
    }

    #[test]
    fn test_credentials_from_config() {
        let config = ClientConfig {
            host: "https://cx.example.com".to_string(),
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            timeout_secs: Some(30),
        };

        let creds = config.credentials().unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        let config = ClientConfig {
            host: "https://cx.example.com".to_string(),
            username: Some("admin".to_string()),
            password: None,
            timeout_secs: Some(10),
        };
        config.save_to(path.clone()).unwrap();

        let loaded = ClientConfig::load_from(path.clone()).unwrap();
        assert_eq!(loaded.host, config.host);
        assert_eq!(loaded.username.as_deref(), Some("admin"));
        assert!(loaded.password.is_none());
        assert_eq!(loaded.timeout_secs, Some(10));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().unwrap();
        let result = ClientConfig::load_from(temp.path().join("absent.yaml"));
        assert!(matches!(result, Err(Error::Config(ConfigError::NotFound))));
    }

    #[test]
    fn test_load_rejects_empty_host() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "host: \"\"\n").unwrap();

        let result = ClientConfig::load_from(path);
        assert!(matches!(result, Err(Error::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "host: [unclosed").unwrap();

        let result = ClientConfig::load_from(path);
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }
}
