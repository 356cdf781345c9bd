//! # configs
//!
//! Typed runtime configuration: defaults, then an optional `chorus.toml`,
//! then `CHORUS__*` environment variables (double underscore as the
//! section separator, e.g. `CHORUS__AUTH__JWT_SECRET`).

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret for the bearer-token adapter.
    pub jwt_secret: SecretString,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .add_source(File::with_name("chorus").required(false))
            .add_source(Environment::with_prefix("CHORUS").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_load_requires_the_secret_and_applies_defaults() {
        // Single test: the environment is process-global state.
        std::env::remove_var("CHORUS__AUTH__JWT_SECRET");
        assert!(AppConfig::load().is_err(), "secret must be required");

        std::env::set_var("CHORUS__AUTH__JWT_SECRET", "sekrit");
        let config = AppConfig::load().expect("config");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.jwt_secret.expose_secret(), "sekrit");
        std::env::remove_var("CHORUS__AUTH__JWT_SECRET");
    }
}
