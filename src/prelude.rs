//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use hydra_clmm::prelude::*;
//! ```
//!
//! This re-exports the domain types, the pool, configuration types, the
//! [`FromConfig`] trait and the error types so that consumers don't need to
//! import from individual submodules.

pub use crate::config::{PoolConfig, PositionConfig};
pub use crate::domain::{
    Balance, Direction, FeeRate, MoveResult, Position, PositionId, PriceRange, SqrtRange,
};
pub use crate::error::{AmmError, Result};
pub use crate::pools::{Pool, PositionView};
pub use crate::traits::FromConfig;
