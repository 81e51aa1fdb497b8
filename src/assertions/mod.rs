//! Assertions about failing operations.
//!
//! - [`assert_throws`] - Assert an async operation fails, optionally checking its message
//! - [`assert_throws_sync`] - Same for a blocking closure
//! - [`ExpectedMessage`] - Substring or regex expectation for an error message
//!
//! # Example
//!
//! ```rust
//! use testkit_support::assertions::assert_throws_sync;
//!
//! let err = assert_throws_sync(|| "abc".parse::<u32>(), "invalid digit").unwrap();
//! assert_eq!(err.to_string(), "invalid digit found in string");
//! ```

mod message;
mod throws;

pub use message::ExpectedMessage;
pub use throws::{assert_throws, assert_throws_sync};
