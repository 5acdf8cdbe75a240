//! Pool and position configuration.
//!
//! [`PoolConfig`] is the declarative blueprint for a
//! [`Pool`](crate::pools::Pool); [`PositionConfig`] describes a single
//! deposit.  Both expose a `validate()` method that checks every invariant
//! before anything is constructed.

mod pool_config;
mod position_config;

pub use pool_config::PoolConfig;
pub use position_config::PositionConfig;
