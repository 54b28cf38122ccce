//! Shared runtime helpers for the workshop record store crates.
//! - `utils::logging`: tracing subscriber setup
//! - `env`: data directory checks at startup

pub mod env;
pub mod utils;
