//! Conversions between token balances and liquidity.
//!
//! Every function here works in sqrt-price space.  Within a range
//! `[√pa, √pb]` a position of liquidity `L` at price `√P` holds
//!
//! ```text
//! x = L / √P − L / √pb
//! y = L · √P − L · √pa
//! ```
//!
//! with `√P` clamped into the range: below the range the position is all
//! token X, above it all token Y.

use crate::domain::{Balance, PriceRange, SqrtRange};
use crate::error::AmmError;

/// Safety margin subtracted by [`get_max_liquidity`] so that a position
/// can never be charged more than its deposit after rounding.
pub const LIQUIDITY_EPSILON: f64 = 1000.0 * f64::EPSILON;

/// Element-wise square root of a price range.
#[must_use]
pub fn to_sqrt_range(range: &PriceRange) -> SqrtRange {
    range.to_sqrt()
}

/// Solves the real-reserves invariant `(x + L/√pb)(y + L·√pa) = L²` for `L`.
///
/// Expanding gives `a·L² + b·L + c = 0` with `a = √pa/√pb − 1`,
/// `b = x·√pa + y/√pb` and `c = x·y`.  Since `a < 0` and `c >= 0` the
/// non-negative root is `(−b − √(b² − 4ac)) / 2a`.
///
/// # Errors
///
/// - [`AmmError::InvalidArgument`] if `balance` has a negative or
///   non-finite component.
/// - [`AmmError::InvalidRange`] if the range is numerically zero-width
///   (`√pa/√pb` rounds to 1).
pub fn get_liquidity(balance: Balance, sqrt_range: &SqrtRange) -> crate::error::Result<f64> {
    if !balance.is_non_negative() {
        return Err(AmmError::InvalidArgument(
            "balance must be finite and non-negative",
        ));
    }
    let (pa, pb) = (sqrt_range.lo(), sqrt_range.hi());
    let a = pa / pb - 1.0;
    if a == 0.0 {
        return Err(AmmError::InvalidRange("zero-width range cannot host liquidity"));
    }
    let b = balance.x() * pa + balance.y() / pb;
    let c = balance.x() * balance.y();
    let discriminant = b * b - 4.0 * a * c;
    Ok((-b - discriminant.sqrt()) / (2.0 * a))
}

/// Token amounts held by `liquidity` over `sqrt_range` at `sqrt_price`.
///
/// `sqrt_price` is clamped into the range first, so a price below the range
/// yields `y = 0` and a price above it yields `x = 0`.
#[must_use]
pub fn get_token_amounts(liquidity: f64, sqrt_range: &SqrtRange, sqrt_price: f64) -> Balance {
    let p = sqrt_range.clamp(sqrt_price);
    Balance::new(
        liquidity / p - liquidity / sqrt_range.hi(),
        liquidity * p - liquidity * sqrt_range.lo(),
    )
}

/// Largest liquidity obtainable from `tokens` at `sqrt_price` without
/// spending more than either token amount.
///
/// The over-supplied token is scaled down until both tokens match the ratio
/// the range requires at `sqrt_price`, the rebalanced pair is fed to
/// [`get_liquidity`], and [`LIQUIDITY_EPSILON`] is subtracted.  The result
/// is floored at zero.
///
/// # Errors
///
/// - [`AmmError::InvalidArgument`] if `tokens` has a negative or
///   non-finite component.
/// - [`AmmError::InvalidPrice`] if `sqrt_price` is non-finite or `<= 0`.
/// - Propagates [`get_liquidity`] errors.
pub fn get_max_liquidity(
    tokens: Balance,
    sqrt_range: &SqrtRange,
    sqrt_price: f64,
) -> crate::error::Result<f64> {
    if !tokens.is_non_negative() {
        return Err(AmmError::InvalidArgument(
            "balance must be finite and non-negative",
        ));
    }
    if !sqrt_price.is_finite() || sqrt_price <= 0.0 {
        return Err(AmmError::InvalidPrice(
            "sqrt price must be finite and positive",
        ));
    }

    let rebalanced = if sqrt_price <= sqrt_range.lo() {
        Balance::only_x(tokens.x())
    } else if sqrt_price >= sqrt_range.hi() {
        Balance::only_y(tokens.y())
    } else if tokens.x() == 0.0 || tokens.y() == 0.0 {
        // In range both tokens are required.
        return Ok(0.0);
    } else {
        let unclamped = get_liquidity(tokens, sqrt_range)?;
        let implied = get_token_amounts(unclamped, sqrt_range, sqrt_price);
        let ratio_x = implied.x() / tokens.x();
        let ratio_y = implied.y() / tokens.y();
        if ratio_x > ratio_y {
            Balance::new(tokens.x(), tokens.y() * ratio_y / ratio_x)
        } else {
            Balance::new(tokens.x() * ratio_x / ratio_y, tokens.y())
        }
    };

    let liquidity = get_liquidity(rebalanced, sqrt_range)? - LIQUIDITY_EPSILON;
    Ok(liquidity.max(0.0))
}
