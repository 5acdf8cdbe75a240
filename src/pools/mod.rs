//! The concentrated liquidity [`Pool`] and its read-only [`PositionView`].
//!
//! The pool owns every position and the current sqrt-price.  Trades and
//! forced price moves are executed by a segmented walk (see the `walk`
//! submodule) that keeps liquidity constant within each segment.

mod pool;
mod position_view;
mod walk;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use pool::Pool;
pub use position_view::PositionView;
