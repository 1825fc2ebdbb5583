//! Checkout session payload delivered with `checkout.session.completed`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The subset of a Stripe checkout session needed to mark an order paid.
///
/// Unknown fields in the provider payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionCompleted {
    /// Checkout session id (`cs_...`).
    pub id: String,

    /// Stripe customer id, if the session created or reused one.
    #[serde(default)]
    pub customer: Option<String>,

    /// Our own user reference, passed when the session was created.
    #[serde(default)]
    pub client_reference_id: Option<String>,

    /// Total in the smallest currency unit.
    #[serde(default)]
    pub amount_total: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub payment_status: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSessionCompleted {
    /// Returns the best available reference to the buying user.
    ///
    /// Prefers `client_reference_id`, then `metadata.user_id`, then the
    /// Stripe customer id.
    pub fn user_reference(&self) -> Option<&str> {
        self.client_reference_id
            .as_deref()
            .or_else(|| self.metadata.get("user_id").map(String::as_str))
            .or(self.customer.as_deref())
    }

    /// Returns true if Stripe reports the session as paid.
    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some("paid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_minimal_session() {
        let session: CheckoutSessionCompleted =
            serde_json::from_value(json!({"id": "sess_1", "customer": "u1"})).unwrap();

        assert_eq!(session.id, "sess_1");
        assert_eq!(session.customer.as_deref(), Some("u1"));
        assert!(session.metadata.is_empty());
        assert!(!session.is_paid());
    }

    #[test]
    fn ignores_unknown_fields() {
        let session: CheckoutSessionCompleted = serde_json::from_value(json!({
            "id": "cs_test_1",
            "object": "checkout.session",
            "mode": "payment",
            "amount_total": 2599,
            "currency": "usd",
            "payment_status": "paid"
        }))
        .unwrap();

        assert_eq!(session.amount_total, Some(2599));
        assert!(session.is_paid());
    }

    #[test]
    fn missing_id_fails() {
        let result: Result<CheckoutSessionCompleted, _> =
            serde_json::from_value(json!({"customer": "u1"}));

        assert!(result.is_err());
    }

    #[test]
    fn user_reference_prefers_client_reference_id() {
        let session: CheckoutSessionCompleted = serde_json::from_value(json!({
            "id": "cs_1",
            "customer": "cus_1",
            "client_reference_id": "user-7",
            "metadata": {"user_id": "user-8"}
        }))
        .unwrap();

        assert_eq!(session.user_reference(), Some("user-7"));
    }

    #[test]
    fn user_reference_falls_back_to_metadata_then_customer() {
        let with_metadata: CheckoutSessionCompleted = serde_json::from_value(json!({
            "id": "cs_1",
            "customer": "cus_1",
            "metadata": {"user_id": "user-8"}
        }))
        .unwrap();
        let customer_only: CheckoutSessionCompleted =
            serde_json::from_value(json!({"id": "cs_2", "customer": "cus_2"})).unwrap();
        let anonymous: CheckoutSessionCompleted =
            serde_json::from_value(json!({"id": "cs_3"})).unwrap();

        assert_eq!(with_metadata.user_reference(), Some("user-8"));
        assert_eq!(customer_only.user_reference(), Some("cus_2"));
        assert_eq!(anonymous.user_reference(), None);
    }
}
