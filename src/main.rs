//! Order Service
//!
//! - `POST /orders/webhook` - Stripe webhook handler
//! - `GET /health` - Liveness check

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use secrecy::ExposeSecret;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use order_service::adapters::{
    order_router, CheckoutOrderCompletion, HttpCartService, HttpCartServiceConfig,
    OrderAppState, ResilientCartClient, RollingWindowCircuitBreaker,
};
use order_service::application::{CheckoutSessionCompletedHandler, HandleStripeWebhookHandler};
use order_service::config::{AppConfig, ServerConfig};
use order_service::domain::webhook::{StripeWebhookVerifier, WebhookHandlerRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;

    init_tracing(&config.server);
    tracing::info!("Starting Order Service");

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        product_service = %config.product_service.base_url,
        log_format = ?config.server.log_format,
        "Configuration loaded"
    );

    // Cart lookups
    let cart_service = HttpCartService::new(
        HttpCartServiceConfig::new(config.product_service.base_url.clone())
            .with_timeout(config.product_service.timeout()),
    )?;
    let breaker = RollingWindowCircuitBreaker::new(
        "product-service",
        config.product_service.circuit_breaker_config(),
    );
    let carts = Arc::new(ResilientCartClient::new(
        Arc::new(cart_service),
        Arc::new(breaker),
    ));

    // Webhook intake
    let verifier = StripeWebhookVerifier::new(
        config.payment.stripe_webhook_secret.expose_secret().clone(),
    )
    .with_tolerance(config.payment.signature_tolerance())
    .with_clock_skew(config.payment.clock_skew());

    let orders = Arc::new(CheckoutOrderCompletion::new(carts));
    let registry = WebhookHandlerRegistry::new()
        .register(Arc::new(CheckoutSessionCompletedHandler::new(orders)));
    let webhook_handler = Arc::new(HandleStripeWebhookHandler::new(verifier, registry));

    let app = build_router(OrderAppState::new(webhook_handler), &config.server);

    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_router(state: OrderAppState, server: &ServerConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(server.request_timeout()));

    order_router().layer(middleware).with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
