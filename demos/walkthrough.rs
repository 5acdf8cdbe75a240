//! Concentrated liquidity walkthrough.
//!
//! Demonstrates creating a pool, depositing liquidity over overlapping price
//! ranges, trading in both directions, forcing a price move, and exiting
//! with accrued rewards.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=hydra_clmm=debug cargo run --example walkthrough
//! ```

use hydra_clmm::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hydra_clmm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Concentrated Liquidity Pool ===\n");

    // ── 1. Create the pool ──────────────────────────────────────────────
    //    Price is quoted as Y per X: 1 X = 1500 Y, 0.3 % fee.
    let config = PoolConfig::new(1500.0, 0.003)?;
    let mut pool = Pool::from_config(&config)?;
    println!("Pool created: {config}");

    // ── 2. Deposit liquidity ────────────────────────────────────────────
    //    A narrow position around the price and a wide one behind it.
    let narrow = PositionConfig::from_balance(
        PriceRange::new(1500.0 / 1.1, 1500.0 * 1.1)?,
        Balance::new(10.0, 15_000.0),
    );
    let wide = PositionConfig::from_balance(
        PriceRange::new(1000.0, 2500.0)?,
        Balance::new(5.0, 7_500.0),
    );
    let narrow_id = pool.enter_position(&narrow)?.id();
    let wide_id = pool.enter_position(&wide)?.id();

    for view in pool.positions() {
        println!("  {view}");
    }
    let current = pool.get_current_range(Direction::Up)?;
    println!(
        "Active range: {}  liquidity: {:.2}\n",
        current.to_price_range(),
        pool.get_liquidity_in_current_range(Direction::Up)
    );

    // ── 3. Trade ────────────────────────────────────────────────────────
    let x_out = pool.sell_y(3_000.0)?;
    println!("Sold 3000 Y for {x_out:.6} X, price now {:.4}", pool.price());

    let y_out = pool.sell_x(1.0)?;
    println!("Sold 1 X for {y_out:.4} Y, price now {:.4}", pool.price());

    let x_paid = pool.buy_y(500.0)?;
    println!("Bought 500 Y for {x_paid:.6} X, price now {:.4}", pool.price());

    let y_paid = pool.buy_x(0.5)?;
    println!("Bought 0.5 X for {y_paid:.4} Y, price now {:.4}\n", pool.price());

    // ── 4. Force a price move past the narrow range ─────────────────────
    let moved = pool.move_price(1800.0)?;
    println!("Moved price to 1800: {moved}");
    println!(
        "Positions in range going up: {}\n",
        pool.get_positions_in_range(Direction::Up).len()
    );

    // ── 5. A trade that would run out of liquidity, made atomic ─────────
    let before = pool.price();
    match pool.atomically(|p| p.buy_x(1_000.0)) {
        Ok(paid) => println!("Bought 1000 X for {paid:.4} Y"),
        Err(err) => println!("Rejected: {err} (price still {:.4})", before),
    }
    println!();

    // ── 6. Exit ─────────────────────────────────────────────────────────
    for id in [narrow_id, wide_id] {
        if let Some(view) = pool.get_position(id) {
            println!("{id}: rewards {}", view.rewards());
        }
        let payout = pool.exit_position(id)?;
        println!("{id}: withdrew {payout}");
    }
    println!("Positions left: {}", pool.position_count());

    Ok(())
}
