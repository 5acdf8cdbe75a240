//! Pure liquidity and sqrt-price arithmetic.
//!
//! Nothing in this module holds state.  Everything works in sqrt-price
//! space, where the reserve/liquidity relationship is linear.
//!
//! | Submodule | Contents |
//! |-----------|----------|
//! | `liquidity_math` | balance ⇄ liquidity conversions |
//! | `sqrt_price_math` | reserve deltas for a sqrt-price step and their inverses |

mod liquidity_math;
mod sqrt_price_math;

pub use liquidity_math::{
    get_liquidity, get_max_liquidity, get_token_amounts, to_sqrt_range, LIQUIDITY_EPSILON,
};
pub use sqrt_price_math::{
    amount_x_delta, amount_y_delta, inverse_sqrt_price_delta, sqrt_price_step_for_x,
    sqrt_price_step_for_y,
};
