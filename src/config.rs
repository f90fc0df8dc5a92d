use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const FALLBACK_ADMIN_EMAIL: &str = "admin@example.com";
pub const FALLBACK_ADMIN_PASSWORD: &str = "password123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,

    // Admin credentials
    pub admin_email: String,
    pub admin_password: String,

    // Sessions
    pub session_ttl_secs: u64,

    // Dataset loaded at start-up
    pub seed_path: Option<PathBuf>,

    // Dashboard websocket
    pub dashboard_push_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: 8080,
            admin_email: FALLBACK_ADMIN_EMAIL.to_string(),
            admin_password: FALLBACK_ADMIN_PASSWORD.to_string(),
            session_ttl_secs: 60 * 60 * 8,
            seed_path: None,
            dashboard_push_interval_secs: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = Self::parse_environment()?;
        let defaults = Self::default();

        let config = Self {
            environment: environment.clone(),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,

            admin_email: Self::non_empty_var("ADMIN_EMAIL")
                .unwrap_or(defaults.admin_email),
            admin_password: Self::non_empty_var("ADMIN_PASSWORD")
                .unwrap_or(defaults.admin_password),

            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| defaults.session_ttl_secs.to_string())
                .parse()
                .context("Invalid SESSION_TTL_SECS")?,

            seed_path: Self::non_empty_var("SEED_PATH").map(PathBuf::from),

            dashboard_push_interval_secs: std::env::var("DASHBOARD_PUSH_INTERVAL_SECS")
                .unwrap_or_else(|_| defaults.dashboard_push_interval_secs.to_string())
                .parse()
                .context("Invalid DASHBOARD_PUSH_INTERVAL_SECS")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_environment() -> Result<Environment> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        match env.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => bail!("Unknown environment: {}", env),
        }
    }

    // Empty values fall back the same way missing ones do.
    fn non_empty_var(var: &str) -> Option<String> {
        std::env::var(var).ok().filter(|value| !value.trim().is_empty())
    }

    fn validate(&self) -> Result<()> {
        if self.session_ttl_secs == 0 {
            bail!("SESSION_TTL_SECS must be greater than zero");
        }
        if self.dashboard_push_interval_secs == 0 {
            bail!("DASHBOARD_PUSH_INTERVAL_SECS must be greater than zero");
        }

        if self.uses_fallback_credentials() {
            tracing::warn!(
                "ADMIN_EMAIL/ADMIN_PASSWORD not set, using fallback admin credentials"
            );
        }

        tracing::info!(
            "Configuration validated for {:?} environment",
            self.environment
        );

        Ok(())
    }

    pub fn uses_fallback_credentials(&self) -> bool {
        self.admin_email == FALLBACK_ADMIN_EMAIL && self.admin_password == FALLBACK_ADMIN_PASSWORD
    }

    /// Session cookies carry `Secure` only in production.
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn dashboard_push_interval(&self) -> Duration {
        Duration::from_secs(self.dashboard_push_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_fallbacks() {
        let config = Config::default();
        assert!(config.uses_fallback_credentials());
        assert_eq!(config.session_ttl(), Duration::from_secs(28_800));
        assert!(!config.secure_cookies());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let config = Config {
            session_ttl_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_sets_secure_cookies() {
        let config = Config {
            environment: Environment::Production,
            ..Config::default()
        };
        assert!(config.secure_cookies());
    }
}
