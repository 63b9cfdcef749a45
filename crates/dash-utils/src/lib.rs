//! Shared utilities for the stock dashboard
//!
//! This crate provides the ambient pieces every binary in the workspace needs:
//! tracing setup and the application-level configuration.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::{LogFormat, init_tracing_with};
