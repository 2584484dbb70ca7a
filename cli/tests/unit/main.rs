//! Unit tests for the kubedash CLI
//!
//! These tests use mocked dependencies and run fast without Docker or a
//! Kubernetes cluster.

mod env_probe_service;
mod reconcile_service;
mod web_routes;
