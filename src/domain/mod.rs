//! Fundamental domain value types used throughout the library.
//!
//! This module contains the value types that model a single concentrated
//! liquidity pair: token balances, price ranges in price and sqrt-price
//! space, fee rates, position identities and the positions themselves.
//! Newtypes use validated constructors to enforce their invariants.

mod balance;
mod direction;
mod fee_rate;
mod move_result;
mod position;
mod position_id;
mod range;

pub use balance::Balance;
pub use direction::Direction;
pub use fee_rate::FeeRate;
pub use move_result::MoveResult;
pub use position::Position;
pub use position_id::PositionId;
pub use range::{PriceRange, SqrtRange};
