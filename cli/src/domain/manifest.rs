//! Kubernetes manifest decoding and resource-type derivation.
//!
//! Everything here works on in-memory strings and JSON values; reading the
//! file and talking to the cluster happen in the reconcile service.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::error::ManifestError;

/// Kinds whose plural does not follow the suffix rules in [`pluralize`].
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("endpoints", "endpoints"),
    ("podmetrics", "pods"),
    ("nodemetrics", "nodes"),
];

// ── Path validation ───────────────────────────────────────────────────────────

/// Whether `path` has a `.yml` or `.yaml` extension (case-insensitive).
#[must_use]
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yml") || e.eq_ignore_ascii_case("yaml"))
}

/// Reject non-YAML paths before any filesystem or cluster access.
pub fn validate_path(path: &Path) -> Result<(), ManifestError> {
    if is_yaml(path) {
        Ok(())
    } else {
        Err(ManifestError::InvalidExtension(path.to_path_buf()))
    }
}

// ── Resource locator ──────────────────────────────────────────────────────────

/// API coordinates of a resource type: group, version, kind and plural name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
}

impl ResourceLocator {
    /// Derive the locator from a document's `apiVersion` and `kind`.
    #[must_use]
    pub fn from_type(api_version: &str, kind: &str) -> Self {
        let (group, version) = match api_version.rsplit_once('/') {
            Some((group, version)) => (group.to_string(), version.to_string()),
            None => (String::new(), api_version.to_string()),
        };
        Self {
            group,
            version,
            kind: kind.to_string(),
            plural: pluralize(kind),
        }
    }

    /// `group/version`, or just `version` for the core group.
    #[must_use]
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

/// Resource plural for a kind: lower-cased, then suffixed.
///
/// `Deployment` → `deployments`, `Ingress` → `ingresses`,
/// `NetworkPolicy` → `networkpolicies`. Kinds listed in
/// [`IRREGULAR_PLURALS`] map directly.
#[must_use]
pub fn pluralize(kind: &str) -> String {
    let lower = kind.to_ascii_lowercase();
    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(k, _)| *k == lower) {
        return (*plural).to_string();
    }
    if lower.ends_with('s') || lower.ends_with('x') || lower.ends_with("ch") || lower.ends_with("sh")
    {
        return format!("{lower}es");
    }
    if let Some(stem) = lower.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        return format!("{stem}ies");
    }
    format!("{lower}s")
}

// ── Documents ─────────────────────────────────────────────────────────────────

/// One decoded manifest document.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    /// Full object, sent as the create/replace payload.
    pub body: Value,
}

impl ManifestDocument {
    /// Build a document from a decoded value.
    ///
    /// Returns `Ok(None)` for empty documents such as a trailing `---`.
    pub fn from_value(index: usize, body: Value) -> Result<Option<Self>, ManifestError> {
        if body.is_null() {
            return Ok(None);
        }
        let decode_err = |message: &str| ManifestError::Decode {
            index,
            message: message.to_string(),
        };
        if !body.is_object() {
            return Err(decode_err("document is not a mapping"));
        }

        let text = |pointer: &str| {
            body.pointer(pointer)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let api_version = text("/apiVersion").ok_or_else(|| decode_err("missing apiVersion"))?;
        let kind = text("/kind").ok_or_else(|| decode_err("missing kind"))?;
        let name = text("/metadata/name").ok_or_else(|| decode_err("missing metadata.name"))?;
        let namespace = text("/metadata/namespace");

        Ok(Some(Self {
            api_version,
            kind,
            name,
            namespace,
            body,
        }))
    }

    #[must_use]
    pub fn locator(&self) -> ResourceLocator {
        ResourceLocator::from_type(&self.api_version, &self.kind)
    }

    /// The document's namespace, or `default` when unset.
    #[must_use]
    pub fn namespace_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.namespace.as_deref().unwrap_or(default)
    }

    /// Copy of the body carrying `resource_version` in its metadata.
    #[must_use]
    pub fn body_with_resource_version(&self, resource_version: &str) -> Value {
        let mut body = self.body.clone();
        if let Some(obj) = body.as_object_mut() {
            let metadata = obj
                .entry("metadata")
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
            if let Some(meta) = metadata.as_object_mut() {
                meta.insert(
                    "resourceVersion".to_string(),
                    Value::String(resource_version.to_string()),
                );
            }
        }
        body
    }
}

/// Decode a multi-document YAML (or JSON) stream one document at a time.
///
/// Empty documents are skipped. The iterator yields the first decode error
/// and callers are expected to stop there.
pub fn decode_documents(
    content: &str,
) -> impl Iterator<Item = Result<ManifestDocument, ManifestError>> + '_ {
    serde_yaml::Deserializer::from_str(content)
        .enumerate()
        .filter_map(|(index, de)| {
            let value = match Value::deserialize(de) {
                Ok(value) => value,
                Err(e) => {
                    return Some(Err(ManifestError::Decode {
                        index,
                        message: e.to_string(),
                    }));
                }
            };
            ManifestDocument::from_value(index, value).transpose()
        })
}
