//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating a pool from its
//! configuration struct.
//!
//! # Validation Contract
//!
//! Implementations **must** validate all configuration invariants during
//! construction.  A successfully constructed pool is guaranteed to be in
//! a valid initial state:
//!
//! - the initial price is finite and strictly positive;
//! - the fee rate lies in `[0, 1)`.

use crate::error::AmmError;

/// Generic construction trait for building a pool from a configuration.
///
/// # Type Parameters
///
/// - `C`: the configuration type that fully describes the pool's
///   immutable parameters.
///
/// # Implementors
///
/// - `impl FromConfig<PoolConfig> for Pool`
pub trait FromConfig<C> {
    /// Creates a new pool instance from the given configuration.
    ///
    /// The configuration is taken by reference because it may be reused,
    /// e.g. to spin up several identical pools in a simulation.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPrice`] if the initial price is invalid.
    /// - [`AmmError::InvalidFee`] if the fee rate is invalid.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
