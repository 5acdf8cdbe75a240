//! Concentrated liquidity pool over continuous price ranges (Uniswap V3
//! style, without tick discretisation).
//!
//! Liquidity is deposited into arbitrary, possibly overlapping price ranges.
//! Within the intersection of the ranges that cover the current price the
//! pool behaves as a constant-liquidity curve parameterised by `√P` and `L`.
//!
//! # Swap Algorithm
//!
//! Every trade and every forced price move runs the same segmented walk:
//!
//! 1. Look up the liquidity active at the current price for the direction
//!    of travel; fail with [`AmmError::InsufficientLiquidity`] if it is zero.
//! 2. Bound the segment by the intersection of the active ranges and by the
//!    nearest boundary of any inactive range that would become active
//!    before it, so that liquidity is constant across the segment.
//! 3. Step `√P` as far as the remaining amount (or target price) allows
//!    inside that bound and derive both reserve changes in closed form.
//! 4. Credit the segment's fee to every active position pro rata to its
//!    liquidity, advance the price, and repeat until the amount is used up.
//!
//! # Fee Tracking
//!
//! Fees are paid out eagerly: each position carries a `rewards` balance that
//! the pool increases segment by segment.  Sells deduct the fee from the
//! input, buys and forced moves charge it on top of the inflow leg.
//!
//! # Failure Semantics
//!
//! Segments are committed as they are executed.  If a later segment fails,
//! earlier price and reward updates remain applied.  Wrap calls in
//! [`Pool::atomically`] when all-or-nothing behaviour is needed.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::walk::{self, FeeMode, Leg, Limit};
use super::PositionView;
use crate::config::{PoolConfig, PositionConfig};
use crate::domain::{Balance, Direction, FeeRate, MoveResult, Position, PositionId, SqrtRange};
use crate::error::AmmError;
use crate::traits::FromConfig;

/// A single-pair concentrated liquidity pool.
///
/// Created from a [`PoolConfig`] via [`FromConfig`] or with
/// [`Pool::new`].
///
/// # State
///
/// - `sqrt_price`: `√P`, the single source of truth for the price.
/// - `fee_rate`: fraction of each trade paid to liquidity providers.
/// - `positions`: every live position, keyed by id.
///
/// All state is owned by the pool instance; positions are only ever read
/// through [`PositionView`] handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    sqrt_price: f64,
    fee_rate: FeeRate,
    positions: BTreeMap<PositionId, Position>,
    next_id: PositionId,
}

/// Reserve changes and fees accumulated over a whole walk.
#[derive(Debug, Clone, Copy, Default)]
struct WalkOutcome {
    delta: Balance,
    fees: Balance,
}

impl Pool {
    /// Creates a pool at `initial_price` charging `fee_rate`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPrice`] if `initial_price` is non-finite or `<= 0`.
    /// - [`AmmError::InvalidFee`] if `fee_rate` is outside `[0, 1)`.
    pub fn new(initial_price: f64, fee_rate: f64) -> Result<Self, AmmError> {
        Self::from_config(&PoolConfig::new(initial_price, fee_rate)?)
    }

    /// Returns the current sqrt-price.
    #[must_use]
    pub const fn sqrt_price(&self) -> f64 {
        self.sqrt_price
    }

    /// Returns the current price, `√P²`.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.sqrt_price * self.sqrt_price
    }

    /// Returns the fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Returns the number of live positions.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Sum of the liquidity of every live position, in range or not.
    #[must_use]
    pub fn total_liquidity(&self) -> f64 {
        self.positions.values().map(Position::liquidity).sum()
    }

    /// Iterates over every live position in id order.
    pub fn positions(&self) -> impl Iterator<Item = PositionView<'_>> + '_ {
        self.positions
            .values()
            .map(move |p| PositionView::new(p, self.sqrt_price))
    }

    // -- Positions ----------------------------------------------------------

    /// Creates and registers a position.
    ///
    /// When the configuration gives a balance, liquidity is resolved at the
    /// pool's current price, so the deposited amount matches the balance up
    /// to rounding.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the configuration does not
    ///   name exactly one range form and exactly one size form.
    /// - [`AmmError::InvalidArgument`] for negative or non-finite sizes.
    pub fn enter_position(
        &mut self,
        config: &PositionConfig,
    ) -> Result<PositionView<'_>, AmmError> {
        let (sqrt_range, liquidity) = config.resolve(self.sqrt_price)?;
        let id = self.next_id;
        self.next_id = id.next();

        let position = Position::new(id, sqrt_range, liquidity, self.sqrt_price);
        debug!(
            position = %id,
            range = %position.range(),
            liquidity,
            deposit = %position.initial_balance(),
            "entered position"
        );
        self.positions.insert(id, position);
        self.get_position(id).ok_or(AmmError::PositionNotFound(id))
    }

    /// Removes a position and returns its current balance plus its rewards.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PositionNotFound`] if `id` is unknown.
    pub fn exit_position(&mut self, id: PositionId) -> Result<Balance, AmmError> {
        let position = self
            .positions
            .remove(&id)
            .ok_or(AmmError::PositionNotFound(id))?;
        let balance = position.balance_at(self.sqrt_price);
        let payout = balance + position.rewards();
        debug!(
            position = %id,
            balance = %balance,
            rewards = %position.rewards(),
            "exited position"
        );
        Ok(payout)
    }

    /// Looks up a position by id.
    #[must_use]
    pub fn get_position(&self, id: PositionId) -> Option<PositionView<'_>> {
        self.positions
            .get(&id)
            .map(|p| PositionView::new(p, self.sqrt_price))
    }

    /// Positions whose range contains the current price, using the
    /// half-open membership rule for `direction`.
    #[must_use]
    pub fn get_positions_in_range(&self, direction: Direction) -> Vec<PositionView<'_>> {
        self.active(direction)
            .map(|p| PositionView::new(p, self.sqrt_price))
            .collect()
    }

    /// Total liquidity of [`get_positions_in_range`](Self::get_positions_in_range).
    #[must_use]
    pub fn get_liquidity_in_current_range(&self, direction: Direction) -> f64 {
        self.active(direction).map(Position::liquidity).sum()
    }

    /// Intersection of the ranges of every position covering the current
    /// price in `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::OutOfRange`] if no position covers the price.
    pub fn get_current_range(&self, direction: Direction) -> Result<SqrtRange, AmmError> {
        let (lo, hi) = self.active(direction).fold(
            (f64::NEG_INFINITY, f64::INFINITY),
            |(lo, hi), p| (lo.max(p.sqrt_range().lo()), hi.min(p.sqrt_range().hi())),
        );
        SqrtRange::new(lo, hi).map_err(|_| AmmError::OutOfRange)
    }

    fn active(&self, direction: Direction) -> impl Iterator<Item = &Position> + '_ {
        let sqrt_price = self.sqrt_price;
        self.positions
            .values()
            .filter(move |p| p.sqrt_range().contains(sqrt_price, direction))
    }

    /// Current range further narrowed by the nearest boundary of an
    /// inactive position lying ahead in `direction`.
    fn segment_range(&self, direction: Direction) -> Result<SqrtRange, AmmError> {
        let current = self.get_current_range(direction)?;
        let sqrt_price = self.sqrt_price;
        let (mut lo, mut hi) = (current.lo(), current.hi());
        for position in self.positions.values() {
            let range = position.sqrt_range();
            if range.contains(sqrt_price, direction) {
                continue;
            }
            match direction {
                Direction::Up if sqrt_price < range.lo() && range.lo() < hi => hi = range.lo(),
                Direction::Down if lo < range.hi() && range.hi() < sqrt_price => lo = range.hi(),
                _ => {}
            }
        }
        SqrtRange::new(lo, hi).map_err(|_| AmmError::OutOfRange)
    }

    // -- Trading ------------------------------------------------------------

    /// Sells `amount_with_fees` of token Y; returns the X received.
    ///
    /// The fee `amount × fee_rate` is deducted up front and paid to the
    /// active positions in token Y.  Price moves up.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidArgument`] if the amount is not positive.
    /// - [`AmmError::InsufficientLiquidity`] if the walk runs out of
    ///   liquidity; segments already executed stay applied.
    pub fn sell_y(&mut self, amount_with_fees: f64) -> Result<f64, AmmError> {
        let outcome = self.sell(Direction::Up, Leg::Y, amount_with_fees)?;
        let received = -outcome.delta.x();
        debug!(amount_in = amount_with_fees, x_out = received, price = self.price(), "sell y");
        Ok(received)
    }

    /// Buys exactly `amount_desired` of token Y; returns the X paid.
    ///
    /// The payment is `base_cost / (1 − fee_rate)`; the surcharge is paid to
    /// the active positions in token X.  Price moves down.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidArgument`] if the amount is not positive.
    /// - [`AmmError::InsufficientLiquidity`] if the walk runs out of
    ///   liquidity; segments already executed stay applied.
    pub fn buy_y(&mut self, amount_desired: f64) -> Result<f64, AmmError> {
        let outcome = self.buy(Direction::Down, Leg::Y, amount_desired)?;
        let paid = self.fee_rate.gross_up(outcome.delta.x());
        debug!(amount_out = amount_desired, x_in = paid, price = self.price(), "buy y");
        Ok(paid)
    }

    /// Sells `amount_with_fees` of token X; returns the Y received.
    ///
    /// Mirror of [`sell_y`](Self::sell_y): the fee is taken in token X and
    /// price moves down.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidArgument`] if the amount is not positive.
    /// - [`AmmError::InsufficientLiquidity`] if the walk runs out of
    ///   liquidity; segments already executed stay applied.
    pub fn sell_x(&mut self, amount_with_fees: f64) -> Result<f64, AmmError> {
        let outcome = self.sell(Direction::Down, Leg::X, amount_with_fees)?;
        let received = -outcome.delta.y();
        debug!(amount_in = amount_with_fees, y_out = received, price = self.price(), "sell x");
        Ok(received)
    }

    /// Buys exactly `amount_desired` of token X; returns the Y paid.
    ///
    /// Mirror of [`buy_y`](Self::buy_y): the surcharge is taken in token Y
    /// and price moves up.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidArgument`] if the amount is not positive.
    /// - [`AmmError::InsufficientLiquidity`] if the walk runs out of
    ///   liquidity; segments already executed stay applied.
    pub fn buy_x(&mut self, amount_desired: f64) -> Result<f64, AmmError> {
        let outcome = self.buy(Direction::Up, Leg::X, amount_desired)?;
        let paid = self.fee_rate.gross_up(outcome.delta.y());
        debug!(amount_out = amount_desired, y_in = paid, price = self.price(), "buy x");
        Ok(paid)
    }

    /// Moves the price directly to `target_price`.
    ///
    /// The move is treated as a trade against the pool that charges the
    /// implied fee on the inflow leg: token Y for an upward move, token X for
    /// a downward one.  The returned delta already includes that fee.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPrice`] if `target_price` is non-finite or `<= 0`.
    /// - [`AmmError::InsufficientLiquidity`] if no liquidity covers part of
    ///   the path; segments already executed stay applied.
    pub fn move_price(&mut self, target_price: f64) -> Result<MoveResult, AmmError> {
        if !target_price.is_finite() || target_price <= 0.0 {
            return Err(AmmError::InvalidPrice(
                "target price must be finite and positive",
            ));
        }
        let target = target_price.sqrt();
        let direction = if target > self.sqrt_price {
            Direction::Up
        } else if target < self.sqrt_price {
            Direction::Down
        } else {
            return Ok(MoveResult::NONE);
        };

        let fee = FeeMode::Surcharge(self.fee_rate.surcharge());
        let outcome = self.walk(direction, Limit::SqrtPrice(target), fee)?;
        let result = MoveResult::new(outcome.delta + outcome.fees, outcome.fees);
        debug!(%direction, target_price, delta = %result.delta(), "moved price");
        Ok(result)
    }

    /// Runs `f` against the pool and restores the prior state if it fails.
    ///
    /// The trade operations themselves never roll back; this is the
    /// snapshot/restore boundary for callers that need atomicity.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f`.
    pub fn atomically<T, F>(&mut self, f: F) -> Result<T, AmmError>
    where
        F: FnOnce(&mut Self) -> Result<T, AmmError>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            debug!("restoring pool snapshot after failed operation");
            *self = snapshot;
        }
        result
    }

    // -- Walk ---------------------------------------------------------------

    fn sell(&mut self, direction: Direction, leg: Leg, amount: f64) -> Result<WalkOutcome, AmmError> {
        Self::check_amount(amount)?;
        let total = self.fee_rate.deducted_from(amount);
        let net = amount - total;
        self.walk(
            direction,
            Limit::Amount {
                leg,
                remaining: net,
            },
            FeeMode::Deducted { total, net },
        )
    }

    fn buy(&mut self, direction: Direction, leg: Leg, amount: f64) -> Result<WalkOutcome, AmmError> {
        Self::check_amount(amount)?;
        self.walk(
            direction,
            Limit::Amount {
                leg,
                remaining: amount,
            },
            FeeMode::Surcharge(self.fee_rate.surcharge()),
        )
    }

    fn check_amount(amount: f64) -> Result<(), AmmError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AmmError::InvalidArgument(
                "trade amount must be finite and positive",
            ));
        }
        Ok(())
    }

    fn walk(
        &mut self,
        direction: Direction,
        mut limit: Limit,
        fee: FeeMode,
    ) -> Result<WalkOutcome, AmmError> {
        let fee_leg = Leg::inflow(direction);
        let mut outcome = WalkOutcome::default();

        while !limit.is_exhausted(self.sqrt_price, direction) {
            let liquidity = self.get_liquidity_in_current_range(direction);
            if liquidity <= 0.0 {
                return Err(AmmError::InsufficientLiquidity);
            }
            let range = self.segment_range(direction)?;
            let segment = walk::plan_segment(self.sqrt_price, liquidity, &range, direction, &limit);
            let segment_fee = fee.segment_fee(&segment, direction);
            trace!(
                %direction,
                %range,
                liquidity,
                from = self.sqrt_price,
                to = segment.end_sqrt_price,
                fee = segment_fee,
                "segment"
            );

            self.distribute_fee(direction, liquidity, fee_leg, segment_fee);
            self.sqrt_price = segment.end_sqrt_price;
            outcome.delta += segment.delta;
            outcome.fees += fee_leg.balance(segment_fee);
            limit.consume(&segment);
        }
        Ok(outcome)
    }

    /// Credits `fee` to the positions active in `direction`, weighted by
    /// `liquidity_i / total_liquidity`.
    fn distribute_fee(&mut self, direction: Direction, total_liquidity: f64, leg: Leg, fee: f64) {
        if fee <= 0.0 {
            return;
        }
        let sqrt_price = self.sqrt_price;
        for position in self.positions.values_mut() {
            if position.sqrt_range().contains(sqrt_price, direction) {
                let share = position.liquidity() / total_liquidity;
                position.accrue(leg.balance(fee * share));
            }
        }
    }
}

impl FromConfig<PoolConfig> for Pool {
    /// Creates an empty pool from the given configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            sqrt_price: config.initial_price().sqrt(),
            fee_rate: config.fee_rate(),
            positions: BTreeMap::new(),
            next_id: PositionId::new(1),
        })
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            sqrt_price: 1.0,
            fee_rate: FeeRate::ZERO,
            positions: BTreeMap::new(),
            next_id: PositionId::new(1),
        }
    }
}
