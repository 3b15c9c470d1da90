//! Runtime configuration for the SDK.
//!
//! Credentials are provisioned per project in the maibmerchants cabinet
//! and usually reach the process through the environment:
//! `MAIB_MIA_CLIENT_ID`, `MAIB_MIA_CLIENT_SECRET`, `MAIB_MIA_SIGNATURE_KEY`,
//! and optionally `MAIB_MIA_ENVIRONMENT` (`production` or `sandbox`).

use serde::Deserialize;
use url::Url;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.maibmerchants.md/";
/// Sandbox API root.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.maibmerchants.md/";

/// Errors produced when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("unknown environment `{0}`, expected `production` or `sandbox`")]
    InvalidEnvironment(String),
}

/// Which MIA deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    /// API root URL for this environment.
    pub fn base_url(self) -> Url {
        let raw = match self {
            Environment::Production => DEFAULT_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        };
        Url::parse(raw).expect("valid base url")
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            _ => Err(ConfigError::InvalidEnvironment(s.to_owned())),
        }
    }
}

/// Project credentials plus target environment.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub environment: Environment,
    pub client_id: String,
    pub client_secret: String,
    /// Shared secret for callback signature verification.
    pub signature_key: String,
}

impl Config {
    /// Load the configuration from `MAIB_MIA_*` environment variables.
    ///
    /// `MAIB_MIA_ENVIRONMENT` is optional and defaults to production.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match std::env::var("MAIB_MIA_ENVIRONMENT") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        Ok(Self {
            environment,
            client_id: require_var("MAIB_MIA_CLIENT_ID")?,
            client_secret: require_var("MAIB_MIA_CLIENT_SECRET")?,
            signature_key: require_var("MAIB_MIA_SIGNATURE_KEY")?,
        })
    }
}

// Secrets stay out of logs even when the whole config is dumped.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("signature_key", &"<redacted>")
            .finish()
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_environment_names() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Sandbox".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn environment_base_urls() {
        assert_eq!(Environment::Production.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(Environment::Sandbox.base_url().as_str(), SANDBOX_BASE_URL);
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = Config {
            environment: Environment::Sandbox,
            client_id: "project-id".to_owned(),
            client_secret: "hunter2".to_owned(),
            signature_key: "sig-key".to_owned(),
        };
        let dump = format!("{config:?}");
        assert!(dump.contains("project-id"));
        assert!(!dump.contains("hunter2"));
        assert!(!dump.contains("sig-key"));
    }
}
