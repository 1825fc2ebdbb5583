//! Fallback policy - Explicit substitute values for failed remote calls.
//!
//! A call runs through [`call_with_fallback`], which consults the circuit
//! breaker, runs the primary future, records the outcome and, on any
//! failure, returns the value produced by the [`FallbackPolicy`].

use std::fmt;
use std::future::Future;

use crate::ports::{CallPermit, CircuitBreaker};

/// Why the primary call did not produce a value.
#[derive(Debug)]
pub enum CallFailure<E> {
    /// The breaker short-circuited the call; nothing was attempted.
    CircuitOpen,
    /// The primary call ran and failed.
    Failed(E),
}

impl<E: fmt::Display> fmt::Display for CallFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallFailure::CircuitOpen => f.write_str("circuit open"),
            CallFailure::Failed(e) => write!(f, "{}", e),
        }
    }
}

type FallbackFn<T, E> = Box<dyn Fn(&CallFailure<E>) -> T + Send + Sync>;
type ClassifierFn<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// Fallback value plus the classifier deciding which errors count against
/// the breaker.
pub struct FallbackPolicy<T, E> {
    fallback: FallbackFn<T, E>,
    counts_as_failure: ClassifierFn<E>,
}

impl<T, E> FallbackPolicy<T, E> {
    /// Every error counts as a breaker failure.
    pub fn new(fallback: impl Fn(&CallFailure<E>) -> T + Send + Sync + 'static) -> Self {
        Self {
            fallback: Box::new(fallback),
            counts_as_failure: Box::new(|_| true),
        }
    }

    /// Replaces the failure classifier.
    ///
    /// Errors the classifier rejects still yield the fallback but are not
    /// recorded as failures.
    pub fn with_failure_classifier(
        mut self,
        classifier: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.counts_as_failure = Box::new(classifier);
        self
    }

    pub fn fallback(&self, failure: &CallFailure<E>) -> T {
        (self.fallback)(failure)
    }

    pub fn counts_as_failure(&self, error: &E) -> bool {
        (self.counts_as_failure)(error)
    }
}

/// Gives the breaker permit back if the call future is dropped mid-flight.
struct PermitGuard<'a> {
    breaker: &'a dyn CircuitBreaker,
    permit: CallPermit,
    settled: bool,
}

impl Drop for PermitGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.breaker.release(self.permit);
        }
    }
}

/// Runs `primary` behind `breaker`, substituting the policy's fallback on
/// failure. Never returns an error.
pub async fn call_with_fallback<T, E, F, Fut>(
    breaker: &dyn CircuitBreaker,
    policy: &FallbackPolicy<T, E>,
    primary: F,
) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let Some(permit) = breaker.try_acquire() else {
        return policy.fallback(&CallFailure::CircuitOpen);
    };

    let mut guard = PermitGuard {
        breaker,
        permit,
        settled: false,
    };
    let result = primary().await;
    guard.settled = true;

    match result {
        Ok(value) => {
            breaker.record_success(permit);
            value
        }
        Err(error) => {
            if policy.counts_as_failure(&error) {
                breaker.record_failure(permit);
            } else {
                breaker.release(permit);
            }
            policy.fallback(&CallFailure::Failed(error))
        }
    }
}
