// Allow must_use_candidate since mock methods often have useful side effects
#![allow(clippy::must_use_candidate)]

//! Recording callables with scriptable behaviour.
//!
//! [`MockFn`] is the building block for every mock in this crate: it records
//! each call's arguments and timing, then runs the currently installed
//! implementation.
//!
//! # Example
//!
//! ```rust
//! use testkit_support::mock::MockFn;
//!
//! let mock: MockFn<i32, i32> = MockFn::new();
//! assert_eq!(mock.call(5), 0); // default result
//!
//! mock.mock_implementation(|x| x * 2);
//! assert_eq!(mock.call(5), 10);
//!
//! assert_eq!(mock.call_count(), 2);
//! assert!(mock.was_called_with(&5));
//! ```

use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A record of a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord<A> {
    /// The arguments passed to the call.
    pub args: A,
    /// When the call was made (relative to mock creation).
    pub timestamp: Duration,
    /// How long the implementation took.
    pub duration: Duration,
}

type Implementation<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;

struct MockState<A, R> {
    calls: Mutex<Vec<CallRecord<A>>>,
    fallback: Implementation<A, R>,
    implementation: Mutex<Option<Implementation<A, R>>>,
    created_at: Instant,
}

/// A callable that records invocations and returns scripted results.
///
/// Clones share the same call history and implementation, so a clone handed
/// to the code under test can be asserted on through the original.
///
/// # Type Parameters
///
/// - `A` - The argument type (tuples for several arguments)
/// - `R` - The return type
pub struct MockFn<A, R> {
    state: Arc<MockState<A, R>>,
}

/// A mock with no behaviour beyond recording its arguments.
pub type CallRecorder<A> = MockFn<A, ()>;

impl<A, R> MockFn<A, R>
where
    A: Clone + 'static,
{
    /// Create a mock that returns `R::default()` until an implementation is
    /// installed.
    pub fn new() -> Self
    where
        R: Default + 'static,
    {
        Self::from_fallback(Arc::new(|_| R::default()))
    }

    /// Create a mock whose base behaviour is `func`.
    ///
    /// [`mock_reset`](Self::mock_reset) returns to this behaviour.
    pub fn with_implementation<F>(func: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self::from_fallback(Arc::new(func))
    }

    fn from_fallback(fallback: Implementation<A, R>) -> Self {
        Self {
            state: Arc::new(MockState {
                calls: Mutex::new(Vec::new()),
                fallback,
                implementation: Mutex::new(None),
                created_at: Instant::now(),
            }),
        }
    }

    /// Invoke the mock.
    pub fn call(&self, args: A) -> R {
        let implementation = self
            .state
            .implementation
            .lock()
            .clone()
            .unwrap_or_else(|| Arc::clone(&self.state.fallback));

        // Recorded before running so a panicking implementation still counts.
        let index = {
            let mut calls = self.state.calls.lock();
            calls.push(CallRecord {
                args: args.clone(),
                timestamp: self.state.created_at.elapsed(),
                duration: Duration::ZERO,
            });
            calls.len() - 1
        };

        let start = Instant::now();
        let result = implementation(args);
        let duration = start.elapsed();

        if let Some(record) = self.state.calls.lock().get_mut(index) {
            record.duration = duration;
        }
        result
    }

    /// Replace the behaviour for subsequent calls.
    pub fn mock_implementation<F>(&self, func: F)
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        *self.state.implementation.lock() = Some(Arc::new(func));
    }

    /// Return a fixed value from subsequent calls.
    pub fn mock_return_value(&self, value: R)
    where
        R: Clone + Send + Sync + 'static,
    {
        self.mock_implementation(move |_| value.clone());
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<CallRecord<A>> {
        self.state.calls.lock().clone()
    }

    /// Get just the arguments of every recorded call.
    pub fn call_args(&self) -> Vec<A> {
        self.state
            .calls
            .lock()
            .iter()
            .map(|c| c.args.clone())
            .collect()
    }

    /// Get the number of times the mock was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.calls.lock().len()
    }

    /// Check if the mock was called at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Check if the mock was called exactly N times.
    #[must_use]
    pub fn was_called_times(&self, n: usize) -> bool {
        self.call_count() == n
    }

    /// Check if any call received `expected`.
    pub fn was_called_with(&self, expected: &A) -> bool
    where
        A: PartialEq,
    {
        self.state.calls.lock().iter().any(|c| &c.args == expected)
    }

    /// Get the Nth call record (0-indexed).
    pub fn nth_call(&self, n: usize) -> Option<CallRecord<A>> {
        self.state.calls.lock().get(n).cloned()
    }

    /// Get the most recent call record.
    pub fn last_call(&self) -> Option<CallRecord<A>> {
        self.state.calls.lock().last().cloned()
    }

    /// Clear the call history, keeping the current behaviour.
    pub fn reset(&self) {
        self.state.calls.lock().clear();
    }

    /// Clear the call history and any installed implementation.
    pub fn mock_reset(&self) {
        self.reset();
        *self.state.implementation.lock() = None;
    }
}

impl<A, R> Default for MockFn<A, R>
where
    A: Clone + 'static,
    R: Default + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> Clone for MockFn<A, R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: Debug, R> Debug for MockFn<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let calls = self.state.calls.lock();
        f.debug_struct("MockFn")
            .field("call_count", &calls.len())
            .field("calls", &*calls)
            .finish_non_exhaustive()
    }
}
