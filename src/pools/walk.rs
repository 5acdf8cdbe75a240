//! Single-segment arithmetic for the segmented price walk.
//!
//! A trade or forced price move is executed as a sequence of segments.
//! Within one segment the active liquidity is constant, so the price step
//! and the reserve changes follow from the closed forms in
//! [`crate::math`].  This module only plans one segment at a time; the
//! [`Pool`](super::Pool) owns the loop, the range lookup and the fee
//! distribution.

use crate::domain::{Balance, Direction, SqrtRange};
use crate::math;

/// Token an amount is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Leg {
    X,
    Y,
}

impl Leg {
    /// Token flowing into the pool when price moves in `direction`.
    pub(crate) const fn inflow(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Y,
            Direction::Down => Self::X,
        }
    }

    pub(crate) const fn balance(self, amount: f64) -> Balance {
        match self {
            Self::X => Balance::only_x(amount),
            Self::Y => Balance::only_y(amount),
        }
    }

    pub(crate) const fn of(self, balance: &Balance) -> f64 {
        match self {
            Self::X => balance.x(),
            Self::Y => balance.y(),
        }
    }
}

/// What bounds a walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Limit {
    /// Unsigned reserve change still to be executed in `leg`.
    Amount { leg: Leg, remaining: f64 },
    /// Destination sqrt-price.
    SqrtPrice(f64),
}

impl Limit {
    pub(crate) fn is_exhausted(&self, sqrt_price: f64, direction: Direction) -> bool {
        match (*self, direction) {
            (Self::Amount { remaining, .. }, _) => remaining <= 0.0,
            (Self::SqrtPrice(target), Direction::Up) => sqrt_price >= target,
            (Self::SqrtPrice(target), Direction::Down) => sqrt_price <= target,
        }
    }

    /// Marks `segment` as executed.  An uncapped segment always finishes
    /// the amount so that rounding residue cannot spawn an extra segment.
    pub(crate) fn consume(&mut self, segment: &Segment) {
        if let Self::Amount { remaining, .. } = self {
            *remaining = if segment.capped {
                *remaining - segment.consumed
            } else {
                0.0
            };
        }
    }
}

/// How the fee for each segment is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FeeMode {
    /// Fee already taken from the input: a segment gets
    /// `total × consumed / net`.
    Deducted { total: f64, net: f64 },
    /// Fee charged on top of the inflow leg: `inflow × surcharge`.
    Surcharge(f64),
}

impl FeeMode {
    pub(crate) fn segment_fee(&self, segment: &Segment, direction: Direction) -> f64 {
        match *self {
            Self::Deducted { total, net } if net > 0.0 => total * segment.consumed / net,
            Self::Deducted { .. } => 0.0,
            Self::Surcharge(surcharge) => {
                Leg::inflow(direction).of(&segment.delta).abs() * surcharge
            }
        }
    }
}

/// Outcome of planning one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment {
    /// Sqrt-price at the end of the segment.
    pub(crate) end_sqrt_price: f64,
    /// Change in pool reserves, fees excluded.
    pub(crate) delta: Balance,
    /// Unsigned amount of the limit's leg executed by this segment.
    pub(crate) consumed: f64,
    /// `true` if the segment stopped at the range boundary.
    pub(crate) capped: bool,
}

/// Plans the largest step from `sqrt_price` that `limit` allows without
/// leaving `range`.
pub(crate) fn plan_segment(
    sqrt_price: f64,
    liquidity: f64,
    range: &SqrtRange,
    direction: Direction,
    limit: &Limit,
) -> Segment {
    let boundary = match direction {
        Direction::Up => range.hi(),
        Direction::Down => range.lo(),
    };
    let cap = boundary - sqrt_price;

    let wanted = match *limit {
        Limit::Amount { leg, remaining } => {
            let signed = if leg == Leg::inflow(direction) {
                remaining
            } else {
                -remaining
            };
            match leg {
                Leg::X => math::sqrt_price_step_for_x(liquidity, sqrt_price, signed),
                Leg::Y => math::sqrt_price_step_for_y(liquidity, signed),
            }
        }
        Limit::SqrtPrice(target) => target - sqrt_price,
    };

    let capped = wanted.abs() >= cap.abs();
    let (step, end_sqrt_price) = match (capped, *limit) {
        (true, _) => (cap, boundary),
        (false, Limit::SqrtPrice(target)) => (wanted, target),
        (false, Limit::Amount { .. }) => (wanted, sqrt_price + wanted),
    };

    let delta = Balance::new(
        math::amount_x_delta(liquidity, sqrt_price, step),
        math::amount_y_delta(liquidity, step),
    );
    let consumed = match *limit {
        Limit::Amount { leg, .. } if capped => leg.of(&delta).abs(),
        Limit::Amount { remaining, .. } => remaining,
        Limit::SqrtPrice(_) => 0.0,
    };

    Segment {
        end_sqrt_price,
        delta,
        consumed,
        capped,
    }
}
