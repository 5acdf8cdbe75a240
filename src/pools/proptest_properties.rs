//! Property-based tests using `proptest` for pool invariant validation.
//!
//! Covers five properties:
//!
//! 1. **Round trip**: with a zero fee, selling then buying back the same
//!    amount restores the price and costs exactly what was received.
//! 2. **Round trip loses value**: with a fee, selling and selling back the
//!    proceeds returns no more than was put in.
//! 3. **Token conservation**: what positions withdraw equals what they
//!    deposited plus every net inflow from trades and price moves.
//! 4. **Fee accrual**: sells credit exactly `amount × fee_rate` to the
//!    active positions.
//! 5. **Liquidity aggregation**: in-range liquidity is the sum over
//!    in-range positions, and entering by balance never over-spends.

use proptest::prelude::*;

use crate::config::PositionConfig;
use crate::domain::{Balance, Direction, PositionId, PriceRange};
use crate::error::AmmError;
use crate::pools::Pool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pool(fee: f64) -> Pool {
    let Ok(pool) = Pool::new(1.0, fee) else {
        panic!("valid pool");
    };
    pool
}

fn enter(pool: &mut Pool, lo: f64, hi: f64, balance: Balance) -> PositionId {
    let Ok(range) = PriceRange::new(lo, hi) else {
        panic!("valid range");
    };
    let Ok(view) = pool.enter_position(&PositionConfig::from_balance(range, balance)) else {
        panic!("position entered");
    };
    view.id()
}

/// Pool at price 1 with a wide base position over `[0.25, 4]`.
fn base_pool(fee: f64) -> (Pool, PositionId) {
    let mut pool = make_pool(fee);
    let id = enter(&mut pool, 0.25, 4.0, Balance::new(1_000.0, 1_000.0));
    (pool, id)
}

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs()).max(1.0)
}

fn amount_strategy() -> impl Strategy<Value = f64> {
    0.01f64..50.0
}

fn fee_strategy() -> impl Strategy<Value = f64> {
    0.0f64..0.05
}

#[derive(Debug, Clone, Copy)]
enum Op {
    SellY(f64),
    BuyY(f64),
    SellX(f64),
    BuyX(f64),
    Move(f64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        amount_strategy().prop_map(Op::SellY),
        (0.01f64..20.0).prop_map(Op::BuyY),
        amount_strategy().prop_map(Op::SellX),
        (0.01f64..20.0).prop_map(Op::BuyX),
        (0.8f64..1.25).prop_map(Op::Move),
    ]
}

/// Applies `op` atomically and returns the pool's net inflow, or `None` if
/// the operation failed and was rolled back.
fn apply(pool: &mut Pool, op: Op) -> Option<Balance> {
    let target = pool.price();
    let result: Result<Balance, AmmError> = pool.atomically(|p| match op {
        Op::SellY(a) => p.sell_y(a).map(|x| Balance::new(-x, a)),
        Op::BuyY(a) => p.buy_y(a).map(|x| Balance::new(x, -a)),
        Op::SellX(a) => p.sell_x(a).map(|y| Balance::new(a, -y)),
        Op::BuyX(a) => p.buy_x(a).map(|y| Balance::new(-a, y)),
        Op::Move(factor) => p.move_price(target * factor).map(|m| m.delta()),
    });
    result.ok()
}

// ---------------------------------------------------------------------------
// Property 1: Round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_y(amount in amount_strategy()) {
        let (mut pool, _) = base_pool(0.0);
        let start = pool.sqrt_price();
        let Ok(received) = pool.sell_y(amount) else {
            return Ok(());
        };
        let Ok(paid) = pool.buy_y(amount) else {
            return Ok(());
        };
        prop_assert!((pool.sqrt_price() - start).abs() <= 1e-12);
        prop_assert!(
            close(received, paid, 1e-9),
            "received {} but paid {}", received, paid
        );
    }

    #[test]
    fn prop_round_trip_x(amount in amount_strategy()) {
        let (mut pool, _) = base_pool(0.0);
        let start = pool.sqrt_price();
        let Ok(received) = pool.sell_x(amount) else {
            return Ok(());
        };
        let Ok(paid) = pool.buy_x(amount) else {
            return Ok(());
        };
        prop_assert!((pool.sqrt_price() - start).abs() <= 1e-12);
        prop_assert!(
            close(received, paid, 1e-9),
            "received {} but paid {}", received, paid
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Round trip with fees loses value
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_with_fee_loses_value(
        amount in amount_strategy(),
        fee in fee_strategy(),
    ) {
        let (mut pool, _) = base_pool(fee);
        let Ok(x_out) = pool.sell_y(amount) else {
            return Ok(());
        };
        let Ok(y_back) = pool.sell_x(x_out) else {
            return Ok(());
        };
        prop_assert!(
            y_back <= amount * (1.0 + 1e-12),
            "round trip should lose value: {} > {}", y_back, amount
        );
    }
}

// ---------------------------------------------------------------------------
// Property 3: Token conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_tokens_conserved(
        fee in fee_strategy(),
        lo in 0.5f64..0.99,
        hi in 1.01f64..2.0,
        x in 1.0f64..500.0,
        y in 1.0f64..500.0,
        ops in prop::collection::vec(op_strategy(), 1..12),
    ) {
        let (mut pool, base) = base_pool(fee);
        let extra = enter(&mut pool, lo, hi, Balance::new(x, y));
        let mut expected: Balance = pool.positions().map(|v| v.balance()).sum();

        for op in ops {
            if let Some(inflow) = apply(&mut pool, op) {
                expected += inflow;
            }
        }

        let mut withdrawn = Balance::ZERO;
        for id in [base, extra] {
            let Ok(out) = pool.exit_position(id) else {
                return Err(TestCaseError::fail("position vanished"));
            };
            withdrawn += out;
        }
        prop_assert!(withdrawn.is_non_negative());
        prop_assert!(
            close(withdrawn.x(), expected.x(), 1e-9),
            "x: withdrew {} expected {}", withdrawn.x(), expected.x()
        );
        prop_assert!(
            close(withdrawn.y(), expected.y(), 1e-9),
            "y: withdrew {} expected {}", withdrawn.y(), expected.y()
        );
    }
}

// ---------------------------------------------------------------------------
// Property 4: Fee accrual
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sell_fee_fully_distributed(
        amount in amount_strategy(),
        fee in fee_strategy(),
        sell_x in any::<bool>(),
    ) {
        let (mut pool, base) = base_pool(fee);
        let extra = enter(&mut pool, 0.5, 2.0, Balance::new(100.0, 100.0));
        let traded = if sell_x { pool.sell_x(amount) } else { pool.sell_y(amount) };
        if traded.is_err() {
            return Ok(());
        }
        let total: Balance = [base, extra]
            .iter()
            .filter_map(|id| pool.get_position(*id))
            .map(|v| v.rewards())
            .sum();
        let (paid_leg, other_leg) = if sell_x {
            (total.x(), total.y())
        } else {
            (total.y(), total.x())
        };
        prop_assert!(close(paid_leg, amount * fee, 1e-9));
        prop_assert!(other_leg.abs() < f64::EPSILON);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Liquidity aggregation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_liquidity_in_range_is_sum_of_positions(
        ranges in prop::collection::vec((0.3f64..1.5, 1.05f64..3.0, 1.0f64..100.0), 1..6),
        up in any::<bool>(),
    ) {
        let mut pool = make_pool(0.0);
        for (lo, width, size) in ranges {
            enter(&mut pool, lo, lo * width, Balance::new(size, size));
        }
        let direction = if up { Direction::Up } else { Direction::Down };
        let summed: f64 = pool
            .get_positions_in_range(direction)
            .iter()
            .map(|v| v.liquidity())
            .sum();
        prop_assert!(close(pool.get_liquidity_in_current_range(direction), summed, 1e-12));
        prop_assert!(pool.total_liquidity() >= summed);
        if summed > 0.0 {
            prop_assert!(pool.get_current_range(direction).is_ok());
        } else {
            prop_assert_eq!(pool.get_current_range(direction), Err(AmmError::OutOfRange));
        }
    }

    #[test]
    fn prop_enter_never_overspends(
        lo in 0.2f64..0.99,
        width in 1.05f64..4.0,
        x in 0.0f64..1_000.0,
        y in 0.0f64..1_000.0,
    ) {
        let mut pool = make_pool(0.0);
        let id = enter(&mut pool, lo, lo * width, Balance::new(x, y));
        let Some(view) = pool.get_position(id) else {
            return Err(TestCaseError::fail("position missing"));
        };
        let deposit = view.initial_balance();
        prop_assert!(deposit.is_non_negative());
        prop_assert!(deposit.x() <= x * (1.0 + 1e-12) + 1e-12);
        prop_assert!(deposit.y() <= y * (1.0 + 1e-12) + 1e-12);
    }
}
