//! Unified error types for the Hydra CLMM library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Errors are terminal for the single call that raised them and are never
//! retried internally.  A trade that fails part-way through a multi-segment
//! walk keeps the segments it already committed; see
//! [`Pool::atomically`](crate::pools::Pool::atomically) for an opt-in
//! snapshot/restore boundary.

use crate::domain::PositionId;

/// Errors produced by pool, position and liquidity-math operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AmmError {
    /// A trade amount or other scalar argument is out of its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A price (or sqrt-price) is non-finite or non-positive.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// The fee rate lies outside `[0, 1)`.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A price range is empty, inverted, or has a non-positive bound.
    #[error("invalid range: {0}")]
    InvalidRange(&'static str),

    /// Mutually exclusive position parameters were missing or duplicated.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// No position with the given id is registered in the pool.
    #[error("position {0} not found")]
    PositionNotFound(PositionId),

    /// No position covers the current price in the requested direction.
    #[error("current price is not covered by any position")]
    OutOfRange,

    /// The active range holds zero liquidity while a segment still needs
    /// to be executed.
    #[error("insufficient liquidity to complete the trade")]
    InsufficientLiquidity,
}

impl AmmError {
    /// Returns `true` for every variant describing a rejected input
    /// (amount, price, fee, range or position parameters).
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::InvalidPrice(_)
                | Self::InvalidFee(_)
                | Self::InvalidRange(_)
                | Self::InvalidConfiguration(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;
