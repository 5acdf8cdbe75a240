//! Outcome of an externally forced price move.

use core::fmt;

use super::Balance;

/// Net token flow into the pool caused by
/// [`Pool::move_price`](crate::pools::Pool::move_price).
///
/// `delta` is signed from the pool's point of view: a positive component is
/// a token the pool received, a negative one a token it paid out.  The
/// implied fee is already netted into `delta`; [`fees`](Self::fees) reports
/// it separately.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveResult {
    delta: Balance,
    fees: Balance,
}

impl MoveResult {
    /// Result of a move that left the price unchanged.
    pub const NONE: Self = Self {
        delta: Balance::ZERO,
        fees: Balance::ZERO,
    };

    /// Creates a result from the fee-inclusive delta and the fee part.
    #[must_use]
    pub const fn new(delta: Balance, fees: Balance) -> Self {
        Self { delta, fees }
    }

    /// Net token delta received (positive) or paid (negative) by the pool.
    #[must_use]
    pub const fn delta(&self) -> Balance {
        self.delta
    }

    /// Implied fee included in [`delta`](Self::delta).
    #[must_use]
    pub const fn fees(&self) -> Balance {
        self.fees
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveResult(delta={}, fees={})", self.delta, self.fees)
    }
}
