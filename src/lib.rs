//! # Hydra CLMM
//!
//! Concentrated-liquidity AMM simulator: a single token pair, liquidity
//! deposited over arbitrary continuous price ranges, segmented swaps and
//! pro-rata fee rewards.
//!
//! The pool follows the Uniswap V3 model without tick discretisation.
//! Prices are quoted as units of token Y per unit of token X and stored as
//! `√P`, where reserves and liquidity are linearly related:
//!
//! - `x = L/√P − L/√P_hi`
//! - `y = L·√P − L·√P_lo`
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_clmm::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // 1. A pool at price 1500 charging 0.3 %
//! let mut pool = Pool::new(1500.0, 0.003)?;
//!
//! // 2. Deposit 10 X and 15 000 Y over ±10 % of the price
//! let range = PriceRange::new(1500.0 / 1.1, 1500.0 * 1.1)?;
//! let id = pool
//!     .enter_position(&PositionConfig::from_balance(range, Balance::new(10.0, 15_000.0)))?
//!     .id();
//!
//! // 3. Trade against it
//! let x_out = pool.sell_y(1_000.0)?;
//! assert!(x_out > 0.0);
//!
//! // 4. The position earned the fee in token Y
//! let rewards = pool.get_position(id).map(|v| v.rewards()).unwrap_or_default();
//! assert!((rewards.y() - 3.0).abs() < 1e-9);
//!
//! // 5. Withdraw everything
//! let payout = pool.exit_position(id)?;
//! assert!(payout.y() > 15_000.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  uses PoolConfig + PositionConfig
//! └──────┬──────┘
//!        │ from_config / enter_position
//!        ▼
//! ┌─────────────┐
//! │    Pool      │  positions, √P, segmented walk, fee distribution
//! └──────┬──────┘
//!        │ per-segment closed forms
//!        ▼
//! ┌─────────────┐
//! │    Math      │  liquidity ⇄ balance, √P steps
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │   Domain     │  Balance, PriceRange, SqrtRange, FeeRate, Position, …
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Balance`](domain::Balance), [`PriceRange`](domain::PriceRange), [`FeeRate`](domain::FeeRate), [`Position`](domain::Position), etc. |
//! | [`traits`] | [`FromConfig`](traits::FromConfig) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and [`PositionConfig`](config::PositionConfig) |
//! | [`pools`]  | [`Pool`](pools::Pool) and [`PositionView`](pools::PositionView) |
//! | [`math`]   | Liquidity and sqrt-price arithmetic |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! Operations emit [`tracing`] events: `debug` for every position change,
//! trade and price move, `trace` for each walk segment.  Install any
//! subscriber to see them; without one they cost nothing.

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
