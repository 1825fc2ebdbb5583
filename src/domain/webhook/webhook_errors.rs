//! Webhook error types for Stripe webhook handling.

use thiserror::Error;

/// Errors that occur during webhook verification and dispatch.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The Stripe-Signature header is missing or cannot be parsed.
    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    /// No signature in the header matches the expected HMAC.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is older than the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse the verified payload or its data object.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A registered handler failed.
    #[error("Handler failed: {0}")]
    HandlerFailed(String),
}

impl WebhookError {
    /// Returns true if the request could not be authenticated.
    ///
    /// Such requests never reach a handler and are answered with
    /// `"Invalid signature"`.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::MalformedHeader(_)
                | WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
                | WebhookError::InvalidTimestamp
        )
    }
}
