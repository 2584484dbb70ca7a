//! Integration tests for the kubedash CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! None of them need a Docker daemon or a cluster.
