//! CircuitBreaker port - Interface for external service resilience.
//!
//! The circuit breaker pattern prevents cascading failures when external
//! services (here: the product service) become unavailable or slow.
//!
//! ## States
//!
//! - **Closed**: Normal operation, requests flow through
//! - **Open**: Failure rate too high, requests rejected immediately
//! - **Half-Open**: Testing if service recovered, a single trial request allowed
//!
//! ## Transitions
//!
//! ```text
//! Closed --[failure rate >= threshold over rolling window]--> Open
//! Open --[open_cooldown elapsed]--> Half-Open
//! Half-Open --[trial succeeds]--> Closed
//! Half-Open --[trial fails]--> Open
//! ```

use std::time::Duration;

/// Circuit breaker states for external service protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation - requests flow through to the service.
    Closed,

    /// Too many failures - requests rejected immediately without calling service.
    /// The circuit will transition to HalfOpen after open_cooldown.
    Open,

    /// Testing if service recovered - limited requests allowed through.
    /// Success → Closed, Failure → Open.
    HalfOpen,
}

impl CircuitState {
    /// Check if the circuit allows requests through.
    pub fn allows_requests(&self) -> bool {
        matches!(self, CircuitState::Closed | CircuitState::HalfOpen)
    }
}

/// Configuration for circuit breaker behavior.
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Failure ratio (0.0–1.0] over the rolling window that opens the circuit.
    ///
    /// Default: 0.5
    pub failure_rate_threshold: f64,

    /// Number of most recent calls kept in the rolling window.
    ///
    /// Default: 10 calls
    pub window_size: u32,

    /// Calls that must be recorded before the failure rate is evaluated.
    ///
    /// Default: 5 calls
    pub minimum_calls: u32,

    /// Time to stay open before testing recovery (moving to half-open).
    ///
    /// Default: 30 seconds
    pub open_cooldown: Duration,

    /// Maximum concurrent trial requests in half-open state.
    ///
    /// Default: 1 request at a time
    pub half_open_max_requests: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_rate_threshold: 0.5,
            window_size: 10,
            minimum_calls: 5,
            open_cooldown: Duration::from_secs(30),
            half_open_max_requests: 1,
        }
    }
}

/// Admission to make one call through a [`CircuitBreaker`].
///
/// Carries the breaker generation it was issued in. The generation changes
/// on every state transition, so a permit taken before the circuit opened
/// cannot settle the half-open trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a permit must be settled with record_success, record_failure or release"]
pub struct CallPermit {
    generation: u64,
}

impl CallPermit {
    pub fn new(generation: u64) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Port for circuit breaker functionality.
///
/// Implementations own their synchronization; callers share one instance
/// across concurrent requests.
///
/// # Example
///
/// ```ignore
/// let Some(permit) = breaker.try_acquire() else {
///     return fallback();
/// };
/// match service.call().await {
///     Ok(value) => { breaker.record_success(permit); value }
///     Err(_) => { breaker.record_failure(permit); fallback() }
/// }
/// ```
pub trait CircuitBreaker: Send + Sync {
    /// Get the current state of the circuit.
    fn state(&self) -> CircuitState;

    /// Request admission for one call.
    ///
    /// Returns `None` if the circuit is open, or half-open with every trial
    /// permit taken.
    fn try_acquire(&self) -> Option<CallPermit>;

    /// Record a successful call.
    ///
    /// In half-open state, a current trial permit closes the circuit.
    fn record_success(&self, permit: CallPermit);

    /// Record a failed call.
    ///
    /// In closed state, this counts toward the failure rate.
    /// In half-open state, a current trial permit reopens the circuit.
    fn record_failure(&self, permit: CallPermit);

    /// Give back a permit without recording an outcome.
    ///
    /// Used when an admitted call is abandoned or ends with an error that
    /// does not count as a failure.
    fn release(&self, permit: CallPermit);

    /// Force reset the circuit to closed state.
    fn reset(&self);

    /// Get metrics about the circuit breaker.
    fn metrics(&self) -> CircuitBreakerMetrics;
}

/// Metrics about circuit breaker behavior.
#[derive(Debug, Clone, Default)]
pub struct CircuitBreakerMetrics {
    /// Current state
    pub state: Option<CircuitState>,

    /// Total successful requests since creation
    pub total_successes: u64,

    /// Total failed requests since creation
    pub total_failures: u64,

    /// Requests short-circuited without reaching the service
    pub total_rejected: u64,

    /// Times the circuit has opened
    pub times_opened: u64,

    /// Calls currently in the rolling window
    pub window_calls: u32,

    /// Failures currently in the rolling window
    pub window_failures: u32,

    /// Time until circuit transitions to half-open (when open)
    pub time_until_half_open: Option<Duration>,
}

impl CircuitBreakerMetrics {
    /// Failure ratio of the rolling window, 0.0 when empty.
    pub fn failure_rate(&self) -> f64 {
        if self.window_calls == 0 {
            0.0
        } else {
            f64::from(self.window_failures) / f64::from(self.window_calls)
        }
    }
}
