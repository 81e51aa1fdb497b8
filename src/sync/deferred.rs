//! Deferred values: futures completed by the test rather than by the work
//! that created them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;

use crate::error::{Error, Result};

enum State<T> {
    /// Not settled yet; holds the waker of the last poll.
    Pending(Option<Waker>),
    /// Settled, value not yet taken.
    Settled(Result<T>),
    /// Value handed to the awaiting task.
    Taken,
}

struct Shared<T> {
    state: Mutex<State<T>>,
}

impl<T> Shared<T> {
    /// Settle once. Later attempts leave the first outcome in place.
    fn settle(&self, outcome: Result<T>) -> bool {
        let mut state = self.state.lock();
        let State::Pending(waker) = &mut *state else {
            return false;
        };
        let waker = waker.take();
        *state = State::Settled(outcome);
        drop(state);

        if let Some(waker) = waker {
            waker.wake();
        }
        true
    }

    fn is_settled(&self) -> bool {
        !matches!(*self.state.lock(), State::Pending(_))
    }
}

/// The awaiting half of a [`Deferred`].
///
/// Resolves to `Ok(value)` after [`Settle::resolve`] or to the given error
/// after [`Settle::reject`]. If never settled it stays pending forever, so
/// pair it with [`with_timeout`](crate::timing::with_timeout) in tests that
/// may not settle.
pub struct DeferredFuture<T> {
    shared: Arc<Shared<T>>,
}

impl<T> DeferredFuture<T> {
    /// Whether the value has been settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.shared.is_settled()
    }
}

impl<T> Future for DeferredFuture<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.shared.state.lock();
        match std::mem::replace(&mut *state, State::Taken) {
            State::Settled(outcome) => Poll::Ready(outcome),
            State::Pending(_) => {
                *state = State::Pending(Some(cx.waker().clone()));
                Poll::Pending
            }
            State::Taken => Poll::Pending,
        }
    }
}

impl<T> std::fmt::Debug for DeferredFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredFuture")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// The settling half of a [`Deferred`].
///
/// Cheap to clone; every clone settles the same value. Only the first
/// `resolve` or `reject` takes effect.
pub struct Settle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Settle<T> {
    /// Complete the deferred with a value.
    ///
    /// Returns `false` if it was already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.shared.settle(Ok(value))
    }

    /// Fail the deferred with an error.
    ///
    /// Returns `false` if it was already settled.
    pub fn reject(&self, error: Error) -> bool {
        self.shared.settle(Err(error))
    }

    /// Whether the value has been settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.shared.is_settled()
    }
}

impl<T> Clone for Settle<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> std::fmt::Debug for Settle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settle")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// A future and the handle that settles it.
#[derive(Debug)]
pub struct Deferred<T> {
    /// Await this for the outcome.
    pub promise: DeferredFuture<T>,
    /// Use this to resolve or reject.
    pub settle: Settle<T>,
}

/// Create an unsettled [`Deferred`].
///
/// # Example
///
/// ```rust
/// use testkit_support::sync::{create_deferred, Deferred};
///
/// # tokio_test_block(async {
/// let Deferred { promise, settle } = create_deferred::<u32>();
///
/// tokio::spawn(async move {
///     settle.resolve(5);
/// });
///
/// assert_eq!(promise.await.unwrap(), 5);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
/// # }
/// ```
#[must_use]
pub fn create_deferred<T>() -> Deferred<T> {
    let shared = Arc::new(Shared {
        state: Mutex::new(State::Pending(None)),
    });
    Deferred {
        promise: DeferredFuture {
            shared: Arc::clone(&shared),
        },
        settle: Settle { shared },
    }
}
