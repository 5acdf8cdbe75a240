//! Trading fee expressed as a fraction of the traded amount.

use core::fmt;

use crate::error::AmmError;

/// Fee rate in `[0, 1)` charged on every trade.
///
/// Sell-side trades deduct `amount × rate` from the input up front.
/// Buy-side trades and forced price moves charge the
/// [`surcharge`](Self::surcharge) on top of the base cost, so that the
/// payment equals `base / (1 - rate)`.
///
/// # Examples
///
/// ```
/// use hydra_clmm::domain::FeeRate;
///
/// let fee = FeeRate::new(0.003);
/// assert!(fee.is_ok());
/// assert!(FeeRate::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct FeeRate(f64);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(0.0);

    /// Creates a validated fee rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `rate` is non-finite or outside
    /// `[0, 1)`.
    pub fn new(rate: f64) -> crate::error::Result<Self> {
        if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
            return Err(AmmError::InvalidFee("fee rate must lie in [0, 1)"));
        }
        Ok(Self(rate))
    }

    /// Returns the raw fraction.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Fee deducted from an input amount: `amount × rate`.
    #[must_use]
    pub fn deducted_from(&self, amount: f64) -> f64 {
        amount * self.0
    }

    /// Multiplier for the fee charged on top of a base cost:
    /// `1 / (1 - rate) - 1`.
    #[must_use]
    pub fn surcharge(&self) -> f64 {
        1.0 / (1.0 - self.0) - 1.0
    }

    /// Total payment for a given fee-exclusive cost: `base / (1 - rate)`.
    #[must_use]
    pub fn gross_up(&self, base: f64) -> f64 {
        base / (1.0 - self.0)
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}
