//! Application configuration
//!
//! Loaded from environment variables through the `config` and `dotenvy`
//! crates. Variables use the `REVIEW_CYCLES` prefix and `__` between nested
//! keys:
//!
//! - `REVIEW_CYCLES__SERVER__PORT=8080` -> `server.port`
//! - `REVIEW_CYCLES__DATABASE__URL=postgres://...` -> `database.url`
//! - `REVIEW_CYCLES__ORGANIZATION__UTC_OFFSET=-03:00` -> `organization.utc_offset`
//!
//! ```no_run
//! use review_cycles::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod organization;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use organization::OrganizationConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub organization: OrganizationConfig,
}

impl AppConfig {
    /// Reads `.env` when present, then the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` when a required key is missing or a
    /// value does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REVIEW_CYCLES")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.organization.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
