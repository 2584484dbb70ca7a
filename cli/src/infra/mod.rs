//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing adapters: process execution, the
//! Docker Engine client, the Kubernetes client, and configuration loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod cluster;
pub mod command_runner;
pub mod config;
pub mod docker;
