//! Configuration for a concentrated-liquidity pool.

use core::fmt;

use crate::domain::FeeRate;
use crate::error::AmmError;

/// Immutable construction parameters of a [`Pool`](crate::pools::Pool).
///
/// # Validation
///
/// - `initial_price` must be finite and strictly positive.
/// - `fee_rate` must lie in `[0, 1)`.
///
/// # Defaults
///
/// `initial_price = 1`, `fee_rate = 0`.
///
/// # Examples
///
/// ```
/// use hydra_clmm::config::PoolConfig;
///
/// let config = PoolConfig::new(1500.0, 0.003);
/// assert!(config.is_ok());
/// assert!(PoolConfig::new(0.0, 0.003).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolConfig {
    initial_price: f64,
    fee_rate: FeeRate,
}

impl PoolConfig {
    /// Creates a validated pool configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPrice`] if `initial_price` is non-finite or `<= 0`.
    /// - [`AmmError::InvalidFee`] if `fee_rate` is outside `[0, 1)`.
    pub fn new(initial_price: f64, fee_rate: f64) -> Result<Self, AmmError> {
        let config = Self {
            initial_price,
            fee_rate: FeeRate::new(fee_rate)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPrice`] if `initial_price` is non-finite or `<= 0`.
    /// - [`AmmError::InvalidFee`] if `fee_rate` is outside `[0, 1)`.
    pub fn validate(&self) -> Result<(), AmmError> {
        if !self.initial_price.is_finite() || self.initial_price <= 0.0 {
            return Err(AmmError::InvalidPrice(
                "initial price must be finite and positive",
            ));
        }
        FeeRate::new(self.fee_rate.get())?;
        Ok(())
    }

    /// Returns the initial price.
    #[must_use]
    pub const fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Returns the fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_price: 1.0,
            fee_rate: FeeRate::ZERO,
        }
    }
}

impl fmt::Display for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PoolConfig(price={}, fee={})",
            self.initial_price, self.fee_rate
        )
    }
}
