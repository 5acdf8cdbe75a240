//! Direction of a price movement.

use core::fmt;

/// Direction in which a trade or price move pushes the pool's price.
///
/// Adjacent ranges share their boundaries, so range membership depends on
/// the direction of travel:
///
/// - [`Up`](Self::Up): a range `[lo, hi)` is active (lower-inclusive,
///   upper-exclusive).
/// - [`Down`](Self::Down): a range `(lo, hi]` is active (lower-exclusive,
///   upper-inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Price increases: token Y flows into the pool, token X flows out.
    Up,
    /// Price decreases: token X flows into the pool, token Y flows out.
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}
