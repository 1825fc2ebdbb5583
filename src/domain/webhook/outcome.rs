//! Result reported back to the webhook caller.

use std::fmt;

use super::WebhookError;

/// Outcome of handling one webhook delivery.
///
/// The literal strings are part of the external contract; existing callers
/// match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Success,
    InvalidSignature,
    Error,
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookOutcome::Success => "Success",
            WebhookOutcome::InvalidSignature => "Invalid signature",
            WebhookOutcome::Error => "Error",
        }
    }
}

impl From<&WebhookError> for WebhookOutcome {
    fn from(err: &WebhookError) -> Self {
        if err.is_verification_failure() {
            WebhookOutcome::InvalidSignature
        } else {
            WebhookOutcome::Error
        }
    }
}

impl fmt::Display for WebhookOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
