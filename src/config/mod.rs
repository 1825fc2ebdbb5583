//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ORDER_SERVICE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use order_service::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod payment;
mod product_service;
mod server;

pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use product_service::ProductServiceConfig;
pub use server::{LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener and logging configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Stripe webhook verification)
    pub payment: PaymentConfig,

    /// Product service configuration (cart lookups)
    pub product_service: ProductServiceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ORDER_SERVICE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ORDER_SERVICE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ORDER_SERVICE__PRODUCT_SERVICE__BASE_URL=...` -> `product_service.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ORDER_SERVICE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        self.product_service.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("ORDER_SERVICE__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_xxx");
        env::set_var(
            "ORDER_SERVICE__PRODUCT_SERVICE__BASE_URL",
            "http://localhost:8081",
        );
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("ORDER_SERVICE__PAYMENT__STRIPE_WEBHOOK_SECRET");
        env::remove_var("ORDER_SERVICE__PAYMENT__SIGNATURE_TOLERANCE_SECS");
        env::remove_var("ORDER_SERVICE__PRODUCT_SERVICE__BASE_URL");
        env::remove_var("ORDER_SERVICE__PRODUCT_SERVICE__TIMEOUT_MS");
        env::remove_var("ORDER_SERVICE__SERVER__PORT");
        env::remove_var("ORDER_SERVICE__SERVER__LOG_FORMAT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.stripe_webhook_secret.expose_secret(), "whsec_xxx");
        assert_eq!(config.product_service.base_url, "http://localhost:8081");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.payment.signature_tolerance(), Duration::from_secs(300));
        assert_eq!(config.payment.clock_skew(), Duration::from_secs(60));
        assert_eq!(config.product_service.timeout(), Duration::from_millis(3000));
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ORDER_SERVICE__SERVER__PORT", "3000");
        env::set_var("ORDER_SERVICE__SERVER__LOG_FORMAT", "json");
        env::set_var("ORDER_SERVICE__PAYMENT__SIGNATURE_TOLERANCE_SECS", "120");
        env::set_var("ORDER_SERVICE__PRODUCT_SERVICE__TIMEOUT_MS", "500");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.server.json_logs());
        assert_eq!(config.payment.signature_tolerance_secs, 120);
        assert_eq!(config.product_service.timeout_ms, 500);
    }

    #[test]
    fn test_missing_webhook_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::remove_var("ORDER_SERVICE__PAYMENT__STRIPE_WEBHOOK_SECRET");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
