//! Configuration utilities
//!
//! - [`config`] - `bistro.toml` loading, defaults, and validation

pub mod config;
