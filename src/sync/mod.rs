//! Manually settled async values.
//!
//! - [`create_deferred`] - A future plus a handle that settles it from outside

mod deferred;

pub use deferred::{create_deferred, Deferred, DeferredFuture, Settle};
