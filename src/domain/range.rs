//! Continuous price ranges, in price space and in sqrt-price space.

use core::fmt;

use super::Direction;
use crate::error::AmmError;

fn validate_bounds(lo: f64, hi: f64) -> crate::error::Result<()> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(AmmError::InvalidRange("range bounds must be finite"));
    }
    if lo <= 0.0 {
        return Err(AmmError::InvalidRange("range lower bound must be positive"));
    }
    if lo >= hi {
        return Err(AmmError::InvalidRange(
            "range lower bound must be less than upper bound",
        ));
    }
    Ok(())
}

/// A price range `[lo, hi]` with `0 < lo < hi`.
///
/// # Examples
///
/// ```
/// use hydra_clmm::domain::PriceRange;
///
/// assert!(PriceRange::new(1.0 / 1.1, 1.1).is_ok());
/// assert!(PriceRange::new(2.0, 2.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PriceRange {
    lo: f64,
    hi: f64,
}

impl PriceRange {
    /// Creates a validated price range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidRange`] if either bound is non-finite,
    /// `lo <= 0`, or `lo >= hi`.
    pub fn new(lo: f64, hi: f64) -> crate::error::Result<Self> {
        validate_bounds(lo, hi)?;
        Ok(Self { lo, hi })
    }

    /// Lower price bound.
    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper price bound.
    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// Element-wise square root.
    #[must_use]
    pub fn to_sqrt(&self) -> SqrtRange {
        SqrtRange {
            lo: self.lo.sqrt(),
            hi: self.hi.sqrt(),
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// A range `[√pa, √pb]` in sqrt-price space, `0 < lo < hi`.
///
/// This is the representation every liquidity computation works in: token
/// reserves are linear in `√P`, not in `P`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SqrtRange {
    lo: f64,
    hi: f64,
}

impl SqrtRange {
    /// Creates a validated sqrt-price range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidRange`] if either bound is non-finite,
    /// `lo <= 0`, or `lo >= hi`.
    pub fn new(lo: f64, hi: f64) -> crate::error::Result<Self> {
        validate_bounds(lo, hi)?;
        Ok(Self { lo, hi })
    }

    /// Lower sqrt-price bound.
    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper sqrt-price bound.
    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// Squares both bounds back into price space.
    #[must_use]
    pub fn to_price_range(&self) -> PriceRange {
        PriceRange {
            lo: self.lo * self.lo,
            hi: self.hi * self.hi,
        }
    }

    /// Clamps `sqrt_price` into `[lo, hi]`.
    #[must_use]
    pub fn clamp(&self, sqrt_price: f64) -> f64 {
        sqrt_price.clamp(self.lo, self.hi)
    }

    /// Directional membership test.
    ///
    /// Moving [`Up`](Direction::Up) the range is `[lo, hi)`; moving
    /// [`Down`](Direction::Down) it is `(lo, hi]`.
    #[must_use]
    pub fn contains(&self, sqrt_price: f64, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.lo <= sqrt_price && sqrt_price < self.hi,
            Direction::Down => self.lo < sqrt_price && sqrt_price <= self.hi,
        }
    }

    /// Tightest common sub-range of `self` and `other`, or `None` if they
    /// do not overlap with positive width.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let lo = self.lo.max(other.lo);
        let hi = self.hi.min(other.hi);
        (lo < hi).then_some(Self { lo, hi })
    }
}

impl fmt::Display for SqrtRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "√[{}, {}]", self.lo, self.hi)
    }
}
