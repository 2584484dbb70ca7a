//! Unit tests for manifest apply/delete against an in-memory cluster.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use kubedash_cli::application::services::reconcile::{
    ApplySummary, DeleteSummary, apply, delete,
};
use kubedash_cli::domain::{ClusterError, ManifestError};
use serde_json::json;
use tempfile::TempDir;

use crate::mocks::{InMemoryCluster, RecordingReporter};

const TWO_DOCS: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: shop
spec:
  replicas: 2
---
apiVersion: v1
kind: Service
metadata:
  name: web
spec:
  ports:
    - port: 80
";

fn manifest(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write manifest");
    path
}

// ── apply ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn apply_creates_each_document() {
    let dir = TempDir::new().expect("tempdir");
    let path = manifest(&dir, "app.yaml", TWO_DOCS);
    let cluster = InMemoryCluster::new();

    let summary = apply(&cluster, &RecordingReporter::default(), &path, "default")
        .await
        .expect("apply");

    assert_eq!(summary, ApplySummary { created: 2, updated: 0 });
    assert!(cluster.get("deployments", "shop", "web").is_some());
    // No namespace in the document: the default applies.
    assert!(cluster.get("services", "default", "web").is_some());
}

#[tokio::test]
async fn apply_twice_updates_in_place() {
    let dir = TempDir::new().expect("tempdir");
    let path = manifest(&dir, "app.yml", TWO_DOCS);
    let cluster = InMemoryCluster::new();
    let reporter = RecordingReporter::default();

    apply(&cluster, &reporter, &path, "default").await.expect("first apply");
    let summary = apply(&cluster, &reporter, &path, "default")
        .await
        .expect("second apply");

    assert_eq!(summary, ApplySummary { created: 0, updated: 2 });
    assert_eq!(cluster.object_count(), 2);
    let stored = cluster.get("deployments", "shop", "web").expect("stored");
    assert_eq!(stored["metadata"]["resourceVersion"], "1");
    assert!(reporter
        .messages()
        .contains(&"success: Deployment/web configured".to_string()));
}

#[tokio::test]
async fn apply_update_sends_live_resource_version() {
    let dir = TempDir::new().expect("tempdir");
    let path = manifest(&dir, "app.yaml", TWO_DOCS);
    let cluster = InMemoryCluster::new();
    cluster.seed(
        "deployments",
        "shop",
        "web",
        json!({"metadata": {"name": "web"}, "spec": {"replicas": 1}}),
    );

    let summary = apply(&cluster, &RecordingReporter::default(), &path, "default")
        .await
        .expect("apply");

    assert_eq!(summary, ApplySummary { created: 1, updated: 1 });
    let stored = cluster.get("deployments", "shop", "web").expect("stored");
    assert_eq!(stored["spec"]["replicas"], 2);
    assert_eq!(
        cluster.calls()[..3],
        [
            "create deployments/shop/web",
            "get deployments/shop/web",
            "replace deployments/shop/web",
        ]
    );
}

#[tokio::test]
async fn apply_stops_at_first_rejection_without_rollback() {
    let dir = TempDir::new().expect("tempdir");
    let path = manifest(&dir, "app.yaml", TWO_DOCS);
    let cluster = InMemoryCluster::rejecting("Service");

    let err = apply(&cluster, &RecordingReporter::default(), &path, "default")
        .await
        .expect_err("service is rejected");

    match &err {
        ManifestError::Apply { kind, name, source } => {
            assert_eq!(kind, "Service");
            assert_eq!(name, "web");
            assert!(matches!(source, ClusterError::Rejected { code: 422, .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), "apply_error");
    assert!(cluster.get("deployments", "shop", "web").is_some());
}

#[tokio::test]
async fn apply_rejects_non_yaml_before_reading() {
    let dir = TempDir::new().expect("tempdir");
    let path = manifest(&dir, "app.txt", TWO_DOCS);
    let cluster = InMemoryCluster::new();

    let err = apply(&cluster, &RecordingReporter::default(), &path, "default")
        .await
        .expect_err("txt is rejected");

    assert!(matches!(err, ManifestError::InvalidExtension(_)));
    assert!(cluster.calls().is_empty());
}

#[tokio::test]
async fn apply_missing_file_is_read_error() {
    let dir = TempDir::new().expect("tempdir");
    let cluster = InMemoryCluster::new();

    let err = apply(
        &cluster,
        &RecordingReporter::default(),
        &dir.path().join("absent.yaml"),
        "default",
    )
    .await
    .expect_err("file is missing");

    assert!(matches!(err, ManifestError::Read { .. }));
    assert_eq!(err.code(), "io_error");
}

#[tokio::test]
async fn apply_non_utf8_file_is_decode_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("binary.yaml");
    std::fs::write(&path, b"\xff\xfe").expect("write manifest");
    let cluster = InMemoryCluster::new();

    let err = apply(&cluster, &RecordingReporter::default(), &path, "default")
        .await
        .expect_err("content is not UTF-8");

    assert!(matches!(err, ManifestError::Decode { index: 0, .. }));
    assert_eq!(err.code(), "decode_error");
    assert!(cluster.calls().is_empty());
}

#[tokio::test]
async fn apply_malformed_second_document_keeps_first() {
    let dir = TempDir::new().expect("tempdir");
    let content = "\
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
---
apiVersion: v1
kind: ConfigMap
";
    let path = manifest(&dir, "cm.yaml", content);
    let cluster = InMemoryCluster::new();

    let err = apply(&cluster, &RecordingReporter::default(), &path, "default")
        .await
        .expect_err("second document lacks a name");

    assert!(matches!(err, ManifestError::Decode { index: 1, .. }));
    assert!(cluster.get("configmaps", "default", "settings").is_some());
}

#[tokio::test]
async fn apply_skips_empty_documents() {
    let dir = TempDir::new().expect("tempdir");
    let content = "---\napiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: settings\n---\n";
    let path = manifest(&dir, "cm.yaml", content);
    let cluster = InMemoryCluster::new();

    let summary = apply(&cluster, &RecordingReporter::default(), &path, "default")
        .await
        .expect("apply");

    assert_eq!(summary.created, 1);
}

// ── delete ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_resources_then_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = manifest(&dir, "app.yaml", TWO_DOCS);
    let cluster = InMemoryCluster::new();
    let reporter = RecordingReporter::default();
    apply(&cluster, &reporter, &path, "default").await.expect("apply");

    let summary = delete(&cluster, &reporter, &path, "default")
        .await
        .expect("delete");

    assert_eq!(summary, DeleteSummary { deleted: 2, missing: 0 });
    assert_eq!(cluster.object_count(), 0);
    assert!(!path.exists());
}

#[tokio::test]
async fn delete_skips_missing_resources_and_still_removes_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = manifest(&dir, "app.yaml", TWO_DOCS);
    let cluster = InMemoryCluster::new();
    let reporter = RecordingReporter::default();

    let summary = delete(&cluster, &reporter, &path, "default")
        .await
        .expect("delete");

    assert_eq!(summary, DeleteSummary { deleted: 0, missing: 2 });
    assert!(!path.exists());
    assert!(reporter
        .messages()
        .contains(&"warn: Service/web not found, skipping".to_string()));
}

#[tokio::test]
async fn delete_failure_keeps_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = manifest(&dir, "app.yaml", TWO_DOCS);
    let cluster = InMemoryCluster::unreachable();

    let err = delete(&cluster, &RecordingReporter::default(), &path, "default")
        .await
        .expect_err("cluster is down");

    assert!(matches!(
        err,
        ManifestError::Delete {
            source: ClusterError::Unreachable(_),
            ..
        }
    ));
    assert_eq!(err.code(), "delete_error");
    assert!(path.exists());
}

#[tokio::test]
async fn delete_rejects_non_yaml_and_leaves_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = manifest(&dir, "app.json", "{}");
    let cluster = InMemoryCluster::new();

    let err = delete(&cluster, &RecordingReporter::default(), &path, "default")
        .await
        .expect_err("json is rejected");

    assert!(matches!(err, ManifestError::InvalidExtension(_)));
    assert!(path.exists());
    assert!(cluster.calls().is_empty());
}
