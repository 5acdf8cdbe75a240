//! A single concentrated-liquidity deposit.

use core::fmt;

use super::{Balance, PositionId, PriceRange, SqrtRange};
use crate::math;

/// One liquidity deposit confined to one price range.
///
/// The range and the liquidity are fixed at creation.  The token balance is
/// never stored: it is always recomputed from the liquidity and a sqrt-price
/// via [`balance_at`](Self::balance_at).  Only `rewards` changes over the
/// position's lifetime, and only the owning pool changes it.
///
/// Positions are created by [`Pool::enter_position`] and are read through
/// [`PositionView`], which pairs a position with its pool's current price.
///
/// [`Pool::enter_position`]: crate::pools::Pool::enter_position
/// [`PositionView`]: crate::pools::PositionView
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    id: PositionId,
    sqrt_range: SqrtRange,
    liquidity: f64,
    initial_balance: Balance,
    rewards: Balance,
}

impl Position {
    /// Creates a position and snapshots its balance at `sqrt_price`.
    pub(crate) fn new(
        id: PositionId,
        sqrt_range: SqrtRange,
        liquidity: f64,
        sqrt_price: f64,
    ) -> Self {
        Self {
            id,
            sqrt_range,
            liquidity,
            initial_balance: math::get_token_amounts(liquidity, &sqrt_range, sqrt_price),
            rewards: Balance::ZERO,
        }
    }

    /// Returns the position id.
    #[must_use]
    pub const fn id(&self) -> PositionId {
        self.id
    }

    /// Returns the range in sqrt-price space.
    #[must_use]
    pub const fn sqrt_range(&self) -> SqrtRange {
        self.sqrt_range
    }

    /// Returns the range in price space.
    #[must_use]
    pub fn range(&self) -> PriceRange {
        self.sqrt_range.to_price_range()
    }

    /// Returns the liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> f64 {
        self.liquidity
    }

    /// Balance at the moment the position was entered.
    #[must_use]
    pub const fn initial_balance(&self) -> Balance {
        self.initial_balance
    }

    /// Fees accrued so far.
    #[must_use]
    pub const fn rewards(&self) -> Balance {
        self.rewards
    }

    /// Token balance held at `sqrt_price`.
    #[must_use]
    pub fn balance_at(&self, sqrt_price: f64) -> Balance {
        math::get_token_amounts(self.liquidity, &self.sqrt_range, sqrt_price)
    }

    pub(crate) fn accrue(&mut self, fee: Balance) {
        self.rewards += fee;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position({}, range={}, liquidity={})",
            self.id,
            self.range(),
            self.liquidity
        )
    }
}
