//! Claims service configuration

use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;

/// Claims service configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClaimsConfig {
    /// Leading segment of generated claim numbers
    pub claim_number_prefix: String,
    /// Attempts at inserting a new claim before a number conflict is surfaced
    pub creation_retry_attempts: u32,
    /// Attempts at a status or evidence update before a write conflict is surfaced
    pub update_retry_attempts: u32,
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            claim_number_prefix: "S75".to_string(),
            creation_retry_attempts: 3,
            update_retry_attempts: 3,
        }
    }
}

impl ClaimsConfig {
    /// Loads configuration from `CLAIMS_*` environment variables, reading a
    /// `.env` file first if one is present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(Environment::with_prefix("CLAIMS").try_parsing(true))
    }

    /// Loads configuration from any source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let config: ClaimsConfig = Config::builder()
            .set_default("claim_number_prefix", defaults.claim_number_prefix)?
            .set_default("creation_retry_attempts", i64::from(defaults.creation_retry_attempts))?
            .set_default("update_retry_attempts", i64::from(defaults.update_retry_attempts))?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.claim_number_prefix.trim().is_empty() {
            return Err(ConfigError::Message(
                "claim_number_prefix must not be empty".to_string(),
            ));
        }
        if self.creation_retry_attempts == 0 || self.update_retry_attempts == 0 {
            return Err(ConfigError::Message(
                "retry attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
