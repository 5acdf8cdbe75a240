//! Pair of token amounts held by a position, paid by a trader, or owed to one.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub};

/// Amounts of token X and token Y.
///
/// Balances reported for positions are always non-negative.  The same type
/// is reused for signed net flows such as the `delta` of
/// [`MoveResult`](crate::pools::MoveResult), where a positive component means
/// the pool received that token and a negative one means it paid it out.
///
/// # Examples
///
/// ```
/// use hydra_clmm::domain::Balance;
///
/// let a = Balance::new(1.0, 2.0);
/// let b = Balance::new(0.5, 0.5);
/// assert_eq!(a + b, Balance::new(1.5, 2.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Balance {
    x: f64,
    y: f64,
}

impl Balance {
    /// Empty balance.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a balance from raw token amounts.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a balance holding only token X.
    #[must_use]
    pub const fn only_x(x: f64) -> Self {
        Self { x, y: 0.0 }
    }

    /// Creates a balance holding only token Y.
    #[must_use]
    pub const fn only_y(y: f64) -> Self {
        Self { x: 0.0, y }
    }

    /// Amount of token X.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Amount of token Y.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` if both amounts are finite and `>= 0`.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x >= 0.0 && self.y >= 0.0
    }

    /// Returns `true` if both amounts are exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Multiplies both components by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Add for Balance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Balance {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Balance {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Sum for Balance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{x: {}, y: {}}}", self.x, self.y)
    }
}
