//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod container;
pub mod environment;
pub mod error;
pub mod manifest;

pub use container::{ContainerLookup, ContainerSummary, PortMapping, filter_by_image};
pub use environment::{ProbeReport, ProbeStatus};
pub use error::{ClusterError, DockerError, ManifestError, ProbeFailed};
pub use manifest::{ManifestDocument, ResourceLocator};
