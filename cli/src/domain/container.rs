//! Container summaries and image-name filtering.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Reserved lookup key carrying the "no match" explanation.
pub const WARNING_KEY: &str = "warning";

/// Text stored under [`WARNING_KEY`] when nothing matched.
pub const NO_MATCH: &str = "No container matches this condition.";

/// Published port of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub private_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_port: Option<u16>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Read-only view of one container as reported by the Engine API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub image_id: String,
    pub command: String,
    pub created: i64,
    pub state: String,
    pub status: String,
    pub ports: Vec<PortMapping>,
    pub labels: HashMap<String, String>,
}

impl ContainerSummary {
    /// First name without Docker's leading `/`, or the short id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/'))
            .unwrap_or_else(|| self.short_id())
    }

    /// Id truncated to 12 characters, like `docker ps`.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id.get(..12).unwrap_or(&self.id)
    }
}

/// Image-keyed lookup result.
///
/// Serializes as a flat JSON object: `{"<image>": {...}, ...}` or
/// `{"warning": "No container matches this condition."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerLookup {
    #[serde(flatten)]
    pub matches: BTreeMap<String, ContainerSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ContainerLookup {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Keep containers whose image contains `needle` (case-sensitive).
///
/// Later containers with the same image replace earlier ones.
#[must_use]
pub fn filter_by_image(containers: Vec<ContainerSummary>, needle: &str) -> ContainerLookup {
    let matches: BTreeMap<_, _> = containers
        .into_iter()
        .filter(|c| c.image.contains(needle))
        .map(|c| (c.image.clone(), c))
        .collect();

    let warning = matches.is_empty().then(|| NO_MATCH.to_string());
    ContainerLookup { matches, warning }
}
