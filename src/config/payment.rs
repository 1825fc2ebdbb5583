//! Payment configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe webhooks)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe webhook signing secret
    pub stripe_webhook_secret: SecretString,

    /// Maximum age of a signed timestamp, in seconds
    #[serde(default = "default_signature_tolerance")]
    pub signature_tolerance_secs: u64,

    /// How far in the future a signed timestamp may be, in seconds
    #[serde(default = "default_clock_skew")]
    pub clock_skew_secs: u64,
}

impl PaymentConfig {
    pub fn new(stripe_webhook_secret: impl Into<String>) -> Self {
        Self {
            stripe_webhook_secret: SecretString::new(stripe_webhook_secret.into()),
            signature_tolerance_secs: default_signature_tolerance(),
            clock_skew_secs: default_clock_skew(),
        }
    }

    pub fn signature_tolerance(&self) -> Duration {
        Duration::from_secs(self.signature_tolerance_secs)
    }

    pub fn clock_skew(&self) -> Duration {
        Duration::from_secs(self.clock_skew_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.stripe_webhook_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Catch API keys pasted into the webhook secret slot
        if !secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if self.signature_tolerance_secs == 0 || self.signature_tolerance_secs > 3600 {
            return Err(ValidationError::InvalidSignatureTolerance);
        }

        Ok(())
    }
}

fn default_signature_tolerance() -> u64 {
    300
}

fn default_clock_skew() -> u64 {
    60
}
