//! Integration tests exercising the full system from config to pool operation.
//!
//! These tests verify end-to-end flows through the public API: the
//! documented move-price scenario, a multi-provider trading session,
//! config validation, liquidity gaps and the opt-in atomic boundary.

#![allow(clippy::panic)]

use hydra_clmm::prelude::*;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn range(lo: f64, hi: f64) -> PriceRange {
    let Ok(r) = PriceRange::new(lo, hi) else {
        panic!("valid range");
    };
    r
}

fn make_pool(price: f64, fee: f64) -> Pool {
    let Ok(cfg) = PoolConfig::new(price, fee) else {
        panic!("valid pool config");
    };
    let Ok(pool) = Pool::from_config(&cfg) else {
        panic!("valid pool");
    };
    pool
}

fn deposit(pool: &mut Pool, lo: f64, hi: f64, x: f64, y: f64) -> PositionId {
    let cfg = PositionConfig::from_balance(range(lo, hi), Balance::new(x, y));
    let Ok(view) = pool.enter_position(&cfg) else {
        panic!("position entered");
    };
    view.id()
}

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

// ---------------------------------------------------------------------------
// Scenario: forced price move through a single position
// ---------------------------------------------------------------------------

#[test]
fn move_price_through_single_position() {
    let mut pool = make_pool(1500.0, 0.003);
    let id = deposit(&mut pool, 1500.0 / 1.1, 1500.0 * 1.1, 10.0, 15_000.0);

    let Some(view) = pool.get_position(id) else {
        panic!("position registered");
    };
    assert!(approx(view.liquidity(), 8_322.30, 0.01));

    let Ok(moved) = pool.move_price(1650.0) else {
        panic!("price moved");
    };
    assert!(approx(pool.price(), 1650.0, 1e-9));
    assert!(approx(moved.delta().x(), -10.0, 1e-9));
    assert!(approx(moved.delta().y(), 15_779.47, 0.01));
    assert!(approx(moved.fees().y(), 47.34, 0.01));

    let Some(view) = pool.get_position(id) else {
        panic!("position registered");
    };
    assert!(approx(view.balance().x(), 0.0, 1e-9));
    assert!(approx(view.balance().y(), 30_732.13, 0.01));
    assert!(approx(view.rewards().y(), 47.34, 0.01));

    let Ok(payout) = pool.exit_position(id) else {
        panic!("position exited");
    };
    assert!(approx(payout.x(), 0.0, 1e-9));
    assert!(approx(payout.y(), 30_779.47, 0.01));
    assert_eq!(pool.position_count(), 0);
}

// ---------------------------------------------------------------------------
// Scenario: several providers, a trading session, everyone exits
// ---------------------------------------------------------------------------

#[test]
fn trading_session_conserves_tokens() {
    let mut pool = make_pool(1.0, 0.003);
    let ids = [
        deposit(&mut pool, 0.8, 1.25, 100.0, 100.0),
        deposit(&mut pool, 1.0, 1.5, 50.0, 50.0),
        deposit(&mut pool, 0.5, 1.1, 30.0, 30.0),
    ];
    let deposited: Balance = pool.positions().map(|v| v.initial_balance()).sum();
    let mut inflow = Balance::ZERO;

    let Ok(x_out) = pool.sell_y(120.0) else {
        panic!("sell y");
    };
    inflow += Balance::new(-x_out, 120.0);
    let Ok(y_out) = pool.sell_x(80.0) else {
        panic!("sell x");
    };
    inflow += Balance::new(80.0, -y_out);
    let Ok(y_in) = pool.buy_x(30.0) else {
        panic!("buy x");
    };
    inflow += Balance::new(-30.0, y_in);
    let Ok(x_in) = pool.buy_y(40.0) else {
        panic!("buy y");
    };
    inflow += Balance::new(x_in, -40.0);
    for target in [1.3, 0.7, 1.0] {
        let Ok(moved) = pool.move_price(target) else {
            panic!("move to {target}");
        };
        inflow += moved.delta();
    }

    let total_rewards: Balance = pool.positions().map(|v| v.rewards()).sum();
    assert!(total_rewards.x() > 0.0 && total_rewards.y() > 0.0);

    let mut withdrawn = Balance::ZERO;
    for id in ids {
        let Ok(out) = pool.exit_position(id) else {
            panic!("exit {id}");
        };
        assert!(out.is_non_negative());
        withdrawn += out;
    }
    let expected = deposited + inflow;
    assert!(approx(withdrawn.x(), expected.x(), 1e-9), "{withdrawn} vs {expected}");
    assert!(approx(withdrawn.y(), expected.y(), 1e-9), "{withdrawn} vs {expected}");
}

#[test]
fn fees_go_only_to_in_range_providers() {
    let mut pool = make_pool(1.0, 0.01);
    let near = deposit(&mut pool, 1.0 / 1.1, 1.1, 100.0, 100.0);
    let wide = deposit(&mut pool, 1.0 / 1.2, 1.2, 100.0, 100.0);
    let far = deposit(&mut pool, 1.5, 2.0, 100.0, 100.0);

    let Ok(_) = pool.sell_y(10.0) else {
        panic!("sell y");
    };
    let reward = |id| pool.get_position(id).map(|v| v.rewards()).unwrap_or_default();
    // Liquidity 2148.81 vs 1147.72 splits the 0.1 fee 65.2 % / 34.8 %.
    assert!(approx(reward(near).y(), 0.065_184, 1e-6));
    assert!(approx(reward(wide).y(), 0.034_816, 1e-6));
    assert!(reward(far).is_zero());
}

// ---------------------------------------------------------------------------
// Liquidity gaps
// ---------------------------------------------------------------------------

#[test]
fn walk_halts_at_liquidity_gap() {
    let mut pool = make_pool(1.0, 0.0);
    deposit(&mut pool, 0.5, 1.21, 100.0, 100.0);
    deposit(&mut pool, 2.0, 4.0, 100.0, 0.0);

    assert_eq!(pool.sell_y(1_000.0), Err(AmmError::InsufficientLiquidity));
    // Segments up to the end of the first range stay committed.
    assert!(approx(pool.sqrt_price(), 1.1, 1e-12));
    assert_eq!(pool.get_current_range(Direction::Up), Err(AmmError::OutOfRange));

    assert_eq!(pool.move_price(3.0), Err(AmmError::InsufficientLiquidity));
    assert!(approx(pool.sqrt_price(), 1.1, 1e-12));
}

#[test]
fn atomically_leaves_pool_untouched_on_gap() {
    let mut pool = make_pool(1.0, 0.0);
    deposit(&mut pool, 0.5, 1.21, 100.0, 100.0);
    let before = pool.clone();

    let result = pool.atomically(|p| p.sell_y(1_000.0));
    assert_eq!(result, Err(AmmError::InsufficientLiquidity));
    assert_eq!(pool, before);
}

// ---------------------------------------------------------------------------
// Config validation
// ---------------------------------------------------------------------------

#[test]
fn invalid_pool_configs_rejected() {
    assert!(PoolConfig::new(-1.0, 0.0).is_err());
    assert!(PoolConfig::new(f64::INFINITY, 0.0).is_err());
    assert!(PoolConfig::new(1.0, -0.1).is_err());
    assert!(PoolConfig::new(1.0, 1.0).is_err());
    assert!(Pool::new(1.0, 0.999).is_ok());
}

#[test]
fn invalid_position_configs_rejected() {
    let mut pool = make_pool(1.0, 0.0);

    let neither = PositionConfig::new().with_liquidity(1.0);
    let both_sizes = PositionConfig::from_liquidity(range(0.5, 2.0), 1.0)
        .with_balance(Balance::new(1.0, 1.0));
    let negative = PositionConfig::from_liquidity(range(0.5, 2.0), -1.0);

    for cfg in [neither, both_sizes, negative] {
        let Err(err) = pool.enter_position(&cfg) else {
            panic!("config {cfg:?} should be rejected");
        };
        assert!(err.is_invalid_argument());
    }
    assert_eq!(pool.position_count(), 0);
    assert!(PriceRange::new(2.0, 1.0).is_err());
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn positions_iterate_in_entry_order() {
    let mut pool = make_pool(1.0, 0.0);
    let a = deposit(&mut pool, 0.5, 2.0, 10.0, 10.0);
    let b = deposit(&mut pool, 0.9, 1.1, 10.0, 10.0);
    let c = deposit(&mut pool, 3.0, 4.0, 10.0, 0.0);

    let ids: Vec<PositionId> = pool.positions().map(|v| v.id()).collect();
    assert_eq!(ids, vec![a, b, c]);

    let active: Vec<PositionId> = pool
        .get_positions_in_range(Direction::Up)
        .iter()
        .map(PositionView::id)
        .collect();
    assert_eq!(active, vec![a, b]);

    let Ok(current) = pool.get_current_range(Direction::Up) else {
        panic!("price covered");
    };
    let price_range = current.to_price_range();
    assert!(approx(price_range.lo(), 0.9, 1e-12));
    assert!(approx(price_range.hi(), 1.1, 1e-12));
}

#[test]
fn display_formats() {
    let mut pool = make_pool(1.0, 0.003);
    let id = deposit(&mut pool, 0.5, 2.0, 10.0, 10.0);
    assert_eq!(id.to_string(), "#1");
    assert_eq!(
        AmmError::PositionNotFound(PositionId::new(9)).to_string(),
        "position #9 not found"
    );
    let Some(view) = pool.get_position(id) else {
        panic!("position registered");
    };
    assert!(view.to_string().contains("rewards="));
}
