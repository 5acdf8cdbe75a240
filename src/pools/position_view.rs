//! Read-only handle pairing a position with its pool's current price.

use core::fmt;

use crate::domain::{Balance, Position, PositionId, PriceRange, SqrtRange};

/// Borrowed view of a [`Position`] that knows the owning pool's current
/// sqrt-price.
///
/// A position never stores its token balance; [`balance`](Self::balance)
/// recomputes it against the price captured when the view was taken, so a
/// fresh view always reflects the pool's latest state without any
/// synchronisation between pool and position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionView<'a> {
    position: &'a Position,
    sqrt_price: f64,
}

impl<'a> PositionView<'a> {
    pub(crate) const fn new(position: &'a Position, sqrt_price: f64) -> Self {
        Self {
            position,
            sqrt_price,
        }
    }

    /// Returns the underlying position.
    #[must_use]
    pub const fn position(&self) -> &'a Position {
        self.position
    }

    /// Returns the position id.
    #[must_use]
    pub const fn id(&self) -> PositionId {
        self.position.id()
    }

    /// Returns the range in price space.
    #[must_use]
    pub fn range(&self) -> PriceRange {
        self.position.range()
    }

    /// Returns the range in sqrt-price space.
    #[must_use]
    pub const fn sqrt_range(&self) -> SqrtRange {
        self.position.sqrt_range()
    }

    /// Returns the liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> f64 {
        self.position.liquidity()
    }

    /// Balance snapshotted at entry.
    #[must_use]
    pub const fn initial_balance(&self) -> Balance {
        self.position.initial_balance()
    }

    /// Fees accrued so far.
    #[must_use]
    pub const fn rewards(&self) -> Balance {
        self.position.rewards()
    }

    /// Token balance at the pool's current price.
    #[must_use]
    pub fn balance(&self) -> Balance {
        self.position.balance_at(self.sqrt_price)
    }
}

impl fmt::Display for PositionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} balance={} rewards={}",
            self.position,
            self.balance(),
            self.rewards()
        )
    }
}
