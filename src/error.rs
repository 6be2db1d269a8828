//! Crate error type.
//!
//! Two kinds of failure leave the core as errors: malformed input
//! ([`Error::InvalidArgument`]) and a load update that would make a corridor's
//! traffic negative ([`Error::InvalidTraffic`]). An allocation problem with no
//! safe solution is *not* an error; see [`crate::allocator::Allocator::allocate`].

use thiserror::Error;

use crate::models::Corridor;
use crate::validation::ValidationError;

/// Errors raised by the allocation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed construction parameters or allocator input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An update would drive a corridor's load below zero (or past the
    /// representable maximum). The traffic record is left unchanged.
    #[error("invalid traffic on {corridor}: current load {current}, update {amount}")]
    InvalidTraffic {
        corridor: Corridor,
        current: u32,
        amount: i64,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self::InvalidArgument(message)
    }
}
