//! Product service client configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;
use crate::ports::CircuitBreakerConfig;

/// Product service configuration (cart lookups and their circuit breaker)
#[derive(Debug, Clone, Deserialize)]
pub struct ProductServiceConfig {
    /// Base URL, e.g. `http://product-service:8081`
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Failure rate in the window at which the breaker opens
    #[serde(default = "default_failure_rate_threshold")]
    pub failure_rate_threshold: f64,

    /// Number of most recent calls the breaker evaluates
    #[serde(default = "default_window_size")]
    pub window_size: u32,

    /// Calls required in the window before the rate is evaluated
    #[serde(default = "default_minimum_calls")]
    pub minimum_calls: u32,

    /// Seconds the breaker stays open before allowing a trial call
    #[serde(default = "default_open_cooldown")]
    pub open_cooldown_secs: u64,
}

impl ProductServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: default_timeout_ms(),
            failure_rate_threshold: default_failure_rate_threshold(),
            window_size: default_window_size(),
            minimum_calls: default_minimum_calls(),
            open_cooldown_secs: default_open_cooldown(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Breaker settings for the cart client
    pub fn circuit_breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_rate_threshold: self.failure_rate_threshold,
            window_size: self.window_size,
            minimum_calls: self.minimum_calls,
            open_cooldown: Duration::from_secs(self.open_cooldown_secs),
            half_open_max_requests: 1,
        }
    }

    /// Validate product service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("PRODUCT_SERVICE__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidProductServiceUrl);
        }
        if self.timeout_ms == 0 || self.timeout_ms > 60_000 {
            return Err(ValidationError::InvalidProductServiceTimeout);
        }
        if !(self.failure_rate_threshold > 0.0 && self.failure_rate_threshold <= 1.0) {
            return Err(ValidationError::InvalidFailureRateThreshold);
        }
        if self.minimum_calls == 0 || self.window_size < self.minimum_calls {
            return Err(ValidationError::InvalidWindowSize);
        }
        Ok(())
    }
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_failure_rate_threshold() -> f64 {
    0.5
}

fn default_window_size() -> u32 {
    10
}

fn default_minimum_calls() -> u32 {
    5
}

fn default_open_cooldown() -> u64 {
    30
}
