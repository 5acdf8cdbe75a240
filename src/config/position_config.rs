//! Parameters for entering a new position.

use crate::domain::{Balance, PriceRange, SqrtRange};
use crate::error::AmmError;
use crate::math;

/// Builder describing a position to be entered into a pool.
///
/// Exactly one range form and exactly one liquidity form must be supplied:
///
/// - range: [`with_range`](Self::with_range) (price space) **or**
///   [`with_sqrt_range`](Self::with_sqrt_range) (sqrt-price space);
/// - size: [`with_liquidity`](Self::with_liquidity) (liquidity given
///   directly) **or** [`with_balance`](Self::with_balance) (liquidity
///   derived from a deposit at the pool's current price).
///
/// # Examples
///
/// ```
/// use hydra_clmm::config::PositionConfig;
/// use hydra_clmm::domain::{Balance, PriceRange};
///
/// # fn main() -> Result<(), hydra_clmm::error::AmmError> {
/// let range = PriceRange::new(1500.0 / 1.1, 1500.0 * 1.1)?;
/// let cfg = PositionConfig::new()
///     .with_range(range)
///     .with_balance(Balance::new(10.0, 15_000.0));
/// assert!(cfg.validate().is_ok());
///
/// let incomplete = PositionConfig::new().with_range(range);
/// assert!(incomplete.validate().is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionConfig {
    range: Option<PriceRange>,
    sqrt_range: Option<SqrtRange>,
    liquidity: Option<f64>,
    balance: Option<Balance>,
}

impl PositionConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            range: None,
            sqrt_range: None,
            liquidity: None,
            balance: None,
        }
    }

    /// Shorthand for a price range sized by a deposit.
    #[must_use]
    pub fn from_balance(range: PriceRange, balance: Balance) -> Self {
        Self::new().with_range(range).with_balance(balance)
    }

    /// Shorthand for a price range sized by an explicit liquidity.
    #[must_use]
    pub fn from_liquidity(range: PriceRange, liquidity: f64) -> Self {
        Self::new().with_range(range).with_liquidity(liquidity)
    }

    /// Sets the range in price space.
    #[must_use]
    pub fn with_range(mut self, range: PriceRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Sets the range in sqrt-price space.
    #[must_use]
    pub fn with_sqrt_range(mut self, sqrt_range: SqrtRange) -> Self {
        self.sqrt_range = Some(sqrt_range);
        self
    }

    /// Sets the liquidity directly.
    #[must_use]
    pub fn with_liquidity(mut self, liquidity: f64) -> Self {
        self.liquidity = Some(liquidity);
        self
    }

    /// Sizes the position from a deposit.
    #[must_use]
    pub fn with_balance(mut self, balance: Balance) -> Self {
        self.balance = Some(balance);
        self
    }

    /// Validates the exactly-one-of rules and the supplied values.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if neither or both range forms,
    ///   or neither or both size forms, are supplied.
    /// - [`AmmError::InvalidArgument`] if the liquidity is negative or
    ///   non-finite, or the balance has a negative or non-finite component.
    pub fn validate(&self) -> Result<(), AmmError> {
        match (self.range.is_some(), self.sqrt_range.is_some()) {
            (false, false) => {
                return Err(AmmError::InvalidConfiguration(
                    "either range or sqrt range must be supplied",
                ))
            }
            (true, true) => {
                return Err(AmmError::InvalidConfiguration(
                    "range and sqrt range are mutually exclusive",
                ))
            }
            _ => {}
        }
        match (self.liquidity, self.balance) {
            (None, None) => Err(AmmError::InvalidConfiguration(
                "either liquidity or balance must be supplied",
            )),
            (Some(_), Some(_)) => Err(AmmError::InvalidConfiguration(
                "liquidity and balance are mutually exclusive",
            )),
            (Some(liquidity), None) if !liquidity.is_finite() || liquidity < 0.0 => Err(
                AmmError::InvalidArgument("liquidity must be finite and non-negative"),
            ),
            (None, Some(balance)) if !balance.is_non_negative() => Err(
                AmmError::InvalidArgument("balance must be finite and non-negative"),
            ),
            _ => Ok(()),
        }
    }

    /// Resolves the configuration into a sqrt range and a liquidity value.
    ///
    /// A balance is converted with [`math::get_max_liquidity`] at
    /// `sqrt_price`, so the amount actually deposited matches the balance up
    /// to rounding.
    ///
    /// # Errors
    ///
    /// - Propagates [`validate`](Self::validate) errors.
    /// - Propagates [`math::get_max_liquidity`] errors.
    pub fn resolve(&self, sqrt_price: f64) -> Result<(SqrtRange, f64), AmmError> {
        self.validate()?;
        let sqrt_range = match (self.range, self.sqrt_range) {
            (Some(range), None) => math::to_sqrt_range(&range),
            (None, Some(sqrt_range)) => sqrt_range,
            _ => {
                return Err(AmmError::InvalidConfiguration(
                    "exactly one of range or sqrt range must be supplied",
                ))
            }
        };
        let liquidity = match (self.liquidity, self.balance) {
            (Some(liquidity), None) => liquidity,
            (None, Some(balance)) => math::get_max_liquidity(balance, &sqrt_range, sqrt_price)?,
            _ => {
                return Err(AmmError::InvalidConfiguration(
                    "exactly one of liquidity or balance must be supplied",
                ))
            }
        };
        Ok((sqrt_range, liquidity))
    }

    /// Returns the price-space range, if set.
    #[must_use]
    pub const fn range(&self) -> Option<PriceRange> {
        self.range
    }

    /// Returns the sqrt-space range, if set.
    #[must_use]
    pub const fn sqrt_range(&self) -> Option<SqrtRange> {
        self.sqrt_range
    }

    /// Returns the explicit liquidity, if set.
    #[must_use]
    pub const fn liquidity(&self) -> Option<f64> {
        self.liquidity
    }

    /// Returns the deposit balance, if set.
    #[must_use]
    pub const fn balance(&self) -> Option<Balance> {
        self.balance
    }
}
