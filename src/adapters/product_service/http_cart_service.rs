//! HTTP implementation of the `CartService` port.
//!
//! Calls `GET {base_url}/products/cart/{user_id}` on the product service.
//! Every request is bounded by the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::domain::order::Cart;
use crate::ports::{CartService, CartServiceError};

/// Default request timeout for cart lookups.
pub const DEFAULT_CART_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration for the HTTP cart service.
#[derive(Debug, Clone)]
pub struct HttpCartServiceConfig {
    /// Product service base URL, e.g. `http://product-service:8080`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpCartServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_CART_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Cart lookups against the product service.
pub struct HttpCartService {
    base_url: Url,
    timeout: Duration,
    client: Client,
}

impl HttpCartService {
    /// Creates the service, validating the base URL.
    pub fn new(config: HttpCartServiceConfig) -> Result<Self, CartServiceError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CartServiceError::Network(format!("invalid base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CartServiceError::Network(format!(
                "invalid base URL: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CartServiceError::Network(format!("failed to build client: {}", e)))?;

        Ok(Self {
            base_url,
            timeout: config.timeout,
            client,
        })
    }

    /// Builds the cart endpoint URL, percent-encoding the user id.
    fn cart_url(&self, user_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["products", "cart", user_id]);
        }
        url
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl CartService for HttpCartService {
    async fn fetch_cart(&self, user_id: &str) -> Result<Cart, CartServiceError> {
        let url = self.cart_url(user_id);
        tracing::debug!(%url, "Fetching cart");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                CartServiceError::Timeout {
                    timeout_ms: self.timeout_ms(),
                }
            } else if e.is_connect() {
                CartServiceError::Network(format!("Connection failed: {}", e))
            } else {
                CartServiceError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CartServiceError::UnexpectedStatus(status.as_u16()));
        }

        response.json::<Cart>().await.map_err(|e| {
            if e.is_timeout() {
                CartServiceError::Timeout {
                    timeout_ms: self.timeout_ms(),
                }
            } else {
                CartServiceError::InvalidResponse(e.to_string())
            }
        })
    }
}
