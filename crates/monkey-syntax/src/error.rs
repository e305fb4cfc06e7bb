//! Error handling types shared by the Monkey toolchain.
//!
//! One lightweight, message-carrying error type serves every stage: the
//! parser accumulates them in a list, the evaluator propagates them with
//! `?`. The language core deliberately does not track source positions, so
//! there is no span information to carry.
//!
//! # Examples
//!
//! ```rust
//! use monkey_syntax::error::{Error, Result, error};
//!
//! fn parse_number(s: &str) -> Result<i64> {
//!     s.parse()
//!         .map_err(|_| Error::new(format!("could not parse {:?} as integer", s)))
//! }
//!
//! fn checked_div(a: i64, b: i64) -> Result<i64> {
//!     if b == 0 {
//!         error("division by zero")
//!     } else {
//!         Ok(a / b)
//!     }
//! }
//! ```

use std::fmt;

/// An error produced while parsing or evaluating Monkey source.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// Human-readable error message
    pub msg: String,
}

impl Error {
    /// Creates a new error with the given message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::new(s)
    }
}
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::new(s)
    }
}

/// A specialized `Result` type for Monkey operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to create an error result.
///
/// Shorthand for `Err(Error::new(msg))`.
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}
