//! Count-based rolling window circuit breaker.
//!
//! Keeps the outcomes of the last `window_size` calls. Once at least
//! `minimum_calls` are recorded and the failure ratio reaches the threshold
//! the circuit opens. After `open_cooldown` it half-opens and admits up to
//! `half_open_max_requests` trial calls.
//!
//! Every state transition starts a new generation. Settlements carrying a
//! permit from an earlier generation update the totals but never move the
//! circuit.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::ports::{
    CallPermit, CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitState,
};

/// In-process circuit breaker shared across concurrent callers.
pub struct RollingWindowCircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerState>,
}

struct BreakerState {
    state: CircuitState,
    generation: u64,
    /// `true` marks a failed call.
    window: VecDeque<bool>,
    opened_at: Option<Instant>,
    half_open_in_flight: u32,
    total_successes: u64,
    total_failures: u64,
    total_rejected: u64,
    times_opened: u64,
}

impl BreakerState {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            generation: 0,
            window: VecDeque::new(),
            opened_at: None,
            half_open_in_flight: 0,
            total_successes: 0,
            total_failures: 0,
            total_rejected: 0,
            times_opened: 0,
        }
    }

    fn window_failures(&self) -> u32 {
        self.window.iter().filter(|failed| **failed).count() as u32
    }

    fn is_current(&self, permit: CallPermit) -> bool {
        permit.generation() == self.generation
    }

    fn transition(&mut self, state: CircuitState) {
        self.state = state;
        self.generation += 1;
        self.half_open_in_flight = 0;
    }
}

impl RollingWindowCircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerState::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locks the state and applies any due Open → HalfOpen transition.
    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.state == CircuitState::Open {
            let cooled_down = inner
                .opened_at
                .map_or(true, |at| at.elapsed() >= self.config.open_cooldown);
            if cooled_down {
                inner.transition(CircuitState::HalfOpen);
                tracing::info!(breaker = %self.name, "Circuit breaker half-open");
            }
        }
        inner
    }

    fn open(&self, inner: &mut BreakerState) {
        inner.transition(CircuitState::Open);
        inner.opened_at = Some(Instant::now());
        inner.times_opened += 1;
    }

    fn close(&self, inner: &mut BreakerState) {
        inner.transition(CircuitState::Closed);
        inner.opened_at = None;
        inner.window.clear();
    }

    fn push_outcome(&self, inner: &mut BreakerState, failed: bool) {
        inner.window.push_back(failed);
        while inner.window.len() > self.config.window_size as usize {
            inner.window.pop_front();
        }
    }

    fn failure_threshold_reached(&self, inner: &BreakerState) -> bool {
        let calls = inner.window.len();
        if calls == 0 || calls < self.config.minimum_calls as usize {
            return false;
        }
        let rate = f64::from(inner.window_failures()) / calls as f64;
        rate >= self.config.failure_rate_threshold
    }
}

impl CircuitBreaker for RollingWindowCircuitBreaker {
    fn state(&self) -> CircuitState {
        self.lock().state
    }

    fn try_acquire(&self) -> Option<CallPermit> {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => Some(CallPermit::new(inner.generation)),
            CircuitState::Open => {
                inner.total_rejected += 1;
                None
            }
            CircuitState::HalfOpen => {
                if inner.half_open_in_flight < self.config.half_open_max_requests {
                    inner.half_open_in_flight += 1;
                    Some(CallPermit::new(inner.generation))
                } else {
                    inner.total_rejected += 1;
                    None
                }
            }
        }
    }

    fn record_success(&self, permit: CallPermit) {
        let mut inner = self.lock();
        inner.total_successes += 1;
        if !inner.is_current(permit) {
            return;
        }
        match inner.state {
            CircuitState::Closed => self.push_outcome(&mut inner, false),
            CircuitState::HalfOpen => {
                self.close(&mut inner);
                tracing::info!(breaker = %self.name, "Circuit breaker closed");
            }
            CircuitState::Open => {}
        }
    }

    fn record_failure(&self, permit: CallPermit) {
        let mut inner = self.lock();
        inner.total_failures += 1;
        if !inner.is_current(permit) {
            return;
        }
        match inner.state {
            CircuitState::Closed => {
                self.push_outcome(&mut inner, true);
                if self.failure_threshold_reached(&inner) {
                    let failures = inner.window_failures();
                    let calls = inner.window.len();
                    self.open(&mut inner);
                    tracing::warn!(
                        breaker = %self.name,
                        failures,
                        calls,
                        cooldown_secs = self.config.open_cooldown.as_secs(),
                        "Circuit breaker opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                self.open(&mut inner);
                tracing::warn!(breaker = %self.name, "Trial call failed, circuit breaker reopened");
            }
            CircuitState::Open => {}
        }
    }

    fn release(&self, permit: CallPermit) {
        let mut inner = self.lock();
        if inner.state == CircuitState::HalfOpen && inner.is_current(permit) {
            inner.half_open_in_flight = inner.half_open_in_flight.saturating_sub(1);
        }
    }

    fn reset(&self) {
        let mut inner = self.lock();
        self.close(&mut inner);
        tracing::info!(breaker = %self.name, "Circuit breaker reset");
    }

    fn metrics(&self) -> CircuitBreakerMetrics {
        let inner = self.lock();
        let time_until_half_open = match (inner.state, inner.opened_at) {
            (CircuitState::Open, Some(at)) => {
                Some(self.config.open_cooldown.saturating_sub(at.elapsed()))
            }
            _ => None,
        };
        CircuitBreakerMetrics {
            state: Some(inner.state),
            total_successes: inner.total_successes,
            total_failures: inner.total_failures,
            total_rejected: inner.total_rejected,
            times_opened: inner.times_opened,
            window_calls: inner.window.len() as u32,
            window_failures: inner.window_failures(),
            time_until_half_open,
        }
    }
}
