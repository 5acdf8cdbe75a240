//! Reserve changes along a constant-liquidity segment.
//!
//! Within one segment `L` is constant, so moving `√P` by `d` changes the
//! reserves by
//!
//! ```text
//! Δy = L · d
//! Δx = L · Δ(1/√P) = −L · d / (√P · (√P + d))
//! ```
//!
//! The inverse-price step uses the closed form above instead of
//! `1/(√P + d) − 1/√P`, and [`sqrt_price_step_for_x`] is its exact
//! algebraic inverse.  Selling and then buying back the same nominal amount
//! therefore returns to the starting price up to a few ulps.
//!
//! Signs follow the pool's reserves: a positive delta is a token flowing
//! into the pool.

/// `Δ(1/√P)` for a step `d_sqrt_price` starting at `sqrt_price`.
#[must_use]
pub fn inverse_sqrt_price_delta(sqrt_price: f64, d_sqrt_price: f64) -> f64 {
    -d_sqrt_price / (sqrt_price * (sqrt_price + d_sqrt_price))
}

/// Change in token X reserves for a step `d_sqrt_price`.
#[must_use]
pub fn amount_x_delta(liquidity: f64, sqrt_price: f64, d_sqrt_price: f64) -> f64 {
    liquidity * inverse_sqrt_price_delta(sqrt_price, d_sqrt_price)
}

/// Change in token Y reserves for a step `d_sqrt_price`.
#[must_use]
pub fn amount_y_delta(liquidity: f64, d_sqrt_price: f64) -> f64 {
    liquidity * d_sqrt_price
}

/// Sqrt-price step produced by a token Y reserve change of `delta_y`.
#[must_use]
pub fn sqrt_price_step_for_y(liquidity: f64, delta_y: f64) -> f64 {
    delta_y / liquidity
}

/// Sqrt-price step produced by a token X reserve change of `delta_x`.
///
/// Solves `delta_x = −L·d / (√P(√P + d))` for `d`, giving
/// `d = −delta_x·√P² / (L + delta_x·√P)`.  When X is withdrawn faster than
/// the curve can supply it (`L + delta_x·√P <= 0`) the price would have to
/// go to infinity, and `f64::INFINITY` is returned so the caller's segment
/// cap always applies.
#[must_use]
pub fn sqrt_price_step_for_x(liquidity: f64, sqrt_price: f64, delta_x: f64) -> f64 {
    let denominator = liquidity + delta_x * sqrt_price;
    if denominator <= 0.0 {
        return f64::INFINITY;
    }
    -delta_x * sqrt_price * sqrt_price / denominator
}
