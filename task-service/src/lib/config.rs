use std::env;
use std::fmt;

use auth::jwt::MIN_SECRET_LENGTH;
use auth::AuthConfig;
use auth::JwtHandler;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing settings. `Debug` redacts the secret.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// Allowed browser origins; empty means any origin.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration_minutes() -> i64 {
    30
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.chars().count() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} characters",
                MIN_SECRET_LENGTH
            )));
        }

        if self.jwt.expiration_minutes < 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_minutes must not be negative".to_string(),
            ));
        }

        JwtHandler::parse_algorithm(&self.jwt.algorithm)
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(())
    }

    /// Settings for the authenticator built at startup.
    pub fn auth_config(&self) -> Result<AuthConfig, ConfigError> {
        let algorithm = JwtHandler::parse_algorithm(&self.jwt.algorithm)
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(AuthConfig::new(
            self.jwt.secret.clone(),
            algorithm,
            chrono::Duration::minutes(self.jwt.expiration_minutes),
        ))
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn config(secret: &str, algorithm: &str) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/tasks".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 8000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                algorithm: algorithm.to_string(),
                expiration_minutes: 30,
            },
            cors: CorsConfig::default(),
        }
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        assert!(config("too-short", "HS256").validate().is_err());
        // 31 characters, 62 bytes
        assert!(config(&"é".repeat(31), "HS256").validate().is_err());
        assert!(config(&"é".repeat(32), "HS256").validate().is_ok());
    }

    #[test]
    fn test_shipped_defaults_require_a_secret() {
        let result = ConfigBuilder::builder()
            .add_source(File::from_str(
                include_str!("../../config/default.toml"),
                FileFormat::Toml,
            ))
            .build()
            .and_then(|configuration| configuration.try_deserialize::<Config>());

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_algorithm() {
        let config = config("test-secret-key-for-jwt-signing-at-least-32-bytes", "RS999");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_auth_config_uses_configured_lifetime() {
        let config = config("test-secret-key-for-jwt-signing-at-least-32-bytes", "HS512");
        let auth_config = config.auth_config().unwrap();

        assert_eq!(auth_config.algorithm, auth::Algorithm::HS512);
        assert_eq!(auth_config.token_lifetime, chrono::Duration::minutes(30));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config("test-secret-key-for-jwt-signing-at-least-32-bytes", "HS256");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("test-secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
