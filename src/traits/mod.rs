//! Core trait abstractions.
//!
//! [`FromConfig`] is the configuration-driven constructor implemented by
//! [`Pool`](crate::pools::Pool).

mod from_config;

pub use from_config::FromConfig;
