//! Docker Engine adapter backed by `bollard`.
//!
//! Connection settings come from the standard Docker environment:
//! `DOCKER_HOST` selects the transport and `DOCKER_TLS_VERIFY` /
//! `DOCKER_CERT_PATH` switch TCP connections to TLS. Without `DOCKER_HOST`
//! the local socket is used.

use bollard::container::ListContainersOptions;
use bollard::{API_DEFAULT_VERSION, Docker};

use crate::application::ports::ContainerEngine;
use crate::domain::{ContainerSummary, DockerError, PortMapping};

/// Request timeout for Engine API calls, in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// `ContainerEngine` over the Docker Engine API.
#[derive(Clone)]
pub struct BollardEngine {
    docker: Docker,
}

impl BollardEngine {
    /// Build a client from the Docker environment variables.
    ///
    /// This does not contact the daemon; an unreachable daemon surfaces on
    /// the first request.
    ///
    /// # Errors
    ///
    /// Returns `DockerError::Connection` if the client cannot be configured.
    pub fn connect() -> Result<Self, DockerError> {
        let host = std::env::var("DOCKER_HOST").ok();
        let tls = std::env::var_os("DOCKER_TLS_VERIFY").is_some_and(|v| !v.is_empty());
        Self::connect_to(host.as_deref(), tls)
    }

    /// Build a client for an explicit `DOCKER_HOST` value.
    ///
    /// `None` or an empty host means the local socket. With `tls` set (or an
    /// `https://` host) the certificates are read from `DOCKER_CERT_PATH`.
    ///
    /// # Errors
    ///
    /// Returns `DockerError::Connection` for an unsupported scheme or when the
    /// client cannot be configured.
    pub fn connect_to(host: Option<&str>, tls: bool) -> Result<Self, DockerError> {
        let connection = |e: bollard::errors::Error| DockerError::Connection(e.to_string());
        let docker = match host.filter(|h| !h.is_empty()) {
            None => Docker::connect_with_local_defaults().map_err(connection)?,
            Some(h) if h.starts_with("unix://") || h.starts_with("npipe://") => {
                Docker::connect_with_socket(h, REQUEST_TIMEOUT_SECS, API_DEFAULT_VERSION)
                    .map_err(connection)?
            }
            Some(h) if h.starts_with("https://") || (tls && h.starts_with("tcp://")) => {
                Docker::connect_with_ssl_defaults().map_err(connection)?
            }
            Some(h) if h.starts_with("tcp://") || h.starts_with("http://") => {
                Docker::connect_with_http(h, REQUEST_TIMEOUT_SECS, API_DEFAULT_VERSION)
                    .map_err(connection)?
            }
            Some(h) => {
                return Err(DockerError::Connection(format!(
                    "unsupported DOCKER_HOST scheme: {h}"
                )));
            }
        };
        tracing::debug!(host = host.unwrap_or("local socket"), tls, "docker client created");
        Ok(Self { docker })
    }
}

impl ContainerEngine for BollardEngine {
    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, DockerError> {
        let containers = self
            .docker
            .list_containers(Some(list_options()))
            .await
            .map_err(|e| DockerError::Connection(e.to_string()))?;
        Ok(containers.into_iter().map(into_summary).collect())
    }
}

/// Running containers only, like `docker ps`.
fn list_options() -> ListContainersOptions<String> {
    ListContainersOptions::default()
}

fn into_summary(c: bollard::models::ContainerSummary) -> ContainerSummary {
    ContainerSummary {
        id: c.id.unwrap_or_default(),
        names: c.names.unwrap_or_default(),
        image: c.image.unwrap_or_default(),
        image_id: c.image_id.unwrap_or_default(),
        command: c.command.unwrap_or_default(),
        created: c.created.unwrap_or_default(),
        state: c.state.unwrap_or_default(),
        status: c.status.unwrap_or_default(),
        ports: c
            .ports
            .unwrap_or_default()
            .into_iter()
            .map(|p| PortMapping {
                ip: p.ip,
                private_port: p.private_port,
                public_port: p.public_port,
                protocol: p.typ.map(|t| t.to_string()).filter(|t| !t.is_empty()),
            })
            .collect(),
        labels: c.labels.unwrap_or_default(),
    }
}
