//! Shared types for kubedash.
//!
//! Kept free of I/O so both the CLI and the web layer can depend on it.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod environment;

pub use config::{ComposeFlavor, DashboardConfig};
pub use environment::EnvironmentInfo;
