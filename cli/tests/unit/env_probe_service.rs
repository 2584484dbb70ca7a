//! Unit tests for the environment probe service.

use kubedash_cli::application::services::env_probe::probe;
use kubedash_cli::domain::ProbeStatus;
use kubedash_cli::domain::environment::{COMPOSE_UNAVAILABLE, DOCKER_UNAVAILABLE_HINT};
use kubedash_common::ComposeFlavor;

use crate::mocks::{RecordingReporter, ScriptedRunner, err_output, healthy_docker, ok_output};

#[tokio::test]
async fn probe_passes_with_plugin_json() {
    let runner = healthy_docker();
    let report = probe(&runner, &RecordingReporter::default(), ComposeFlavor::Auto).await;

    assert_eq!(report.status, ProbeStatus::Pass);
    assert_eq!(report.info.docker_version, "27.3.1");
    assert_eq!(report.info.docker_compose_version, "2.29.7");
    assert_eq!(
        report.message,
        "Docker version: 27.3.1, Docker Compose version: 2.29.7"
    );
    // Standalone never consulted once the plugin answered.
    assert!(runner.calls().iter().all(|c| !c.starts_with("docker-compose")));
}

#[tokio::test]
async fn probe_falls_back_to_free_text_plugin_output() {
    let runner = ScriptedRunner::new()
        .on("docker info", ok_output(b""))
        .on(
            "docker version --format {{.Server.Version}}",
            ok_output(b"24.0.7\n"),
        )
        .on(
            "docker compose version --format json",
            err_output(b"unknown flag: --format"),
        )
        .on(
            "docker compose version",
            ok_output(b"Docker Compose version v2.21.0\n"),
        );

    let report = probe(&runner, &RecordingReporter::default(), ComposeFlavor::Auto).await;

    assert_eq!(report.status, ProbeStatus::Pass);
    assert_eq!(report.info.docker_compose_version, "2.21.0");
}

#[tokio::test]
async fn probe_uses_standalone_when_plugin_missing() {
    let runner = ScriptedRunner::new()
        .on("docker info", ok_output(b""))
        .on(
            "docker version --format {{.Server.Version}}",
            ok_output(b"20.10.21\n"),
        )
        .on(
            "docker-compose version",
            ok_output(b"docker-compose version 1.29.2, build 5becea4c\n"),
        );

    let report = probe(&runner, &RecordingReporter::default(), ComposeFlavor::Auto).await;

    assert_eq!(report.status, ProbeStatus::Pass);
    // Free-text parse skips "version v"-worth of bytes after the marker.
    assert_eq!(report.info.docker_compose_version, ".29.2, build 5becea4c");
}

#[tokio::test]
async fn probe_prefers_short_output_for_standalone() {
    let runner = ScriptedRunner::new()
        .on("docker info", ok_output(b""))
        .on(
            "docker version --format {{.Server.Version}}",
            ok_output(b"20.10.21\n"),
        )
        .on("docker-compose version --short", ok_output(b"1.29.2\n"));

    let report = probe(
        &runner,
        &RecordingReporter::default(),
        ComposeFlavor::Standalone,
    )
    .await;

    assert_eq!(report.info.docker_compose_version, "1.29.2");
    assert!(runner.calls().iter().all(|c| !c.starts_with("docker compose")));
}

#[tokio::test]
async fn probe_plugin_flavor_ignores_standalone_binary() {
    let runner = ScriptedRunner::new()
        .on("docker info", ok_output(b""))
        .on(
            "docker version --format {{.Server.Version}}",
            ok_output(b"27.3.1\n"),
        )
        .on("docker-compose version --short", ok_output(b"1.29.2\n"));

    let report = probe(&runner, &RecordingReporter::default(), ComposeFlavor::Plugin).await;

    assert_eq!(report.status, ProbeStatus::Warn);
    assert!(!runner.calls().iter().any(|c| c.starts_with("docker-compose")));
}

#[tokio::test]
async fn probe_warns_when_compose_missing() {
    let runner = ScriptedRunner::new()
        .on("docker info", ok_output(b""))
        .on(
            "docker version --format {{.Server.Version}}",
            ok_output(b"27.3.1\n"),
        );
    let reporter = RecordingReporter::default();

    let report = probe(&runner, &reporter, ComposeFlavor::Auto).await;

    assert_eq!(report.status, ProbeStatus::Warn);
    assert!(report.ok());
    assert_eq!(report.info.docker_version, "27.3.1");
    assert_eq!(report.info.docker_compose_version, "");
    assert!(report.message.contains(COMPOSE_UNAVAILABLE));
}

#[tokio::test]
async fn probe_treats_empty_version_remainder_as_missing() {
    let runner = ScriptedRunner::new()
        .on("docker info", ok_output(b""))
        .on(
            "docker version --format {{.Server.Version}}",
            ok_output(b"27.3.1\n"),
        )
        .on("docker compose version", ok_output(b"version"));

    let report = probe(&runner, &RecordingReporter::default(), ComposeFlavor::Plugin).await;

    assert_eq!(report.status, ProbeStatus::Warn);
}

#[tokio::test]
async fn probe_fails_when_daemon_down() {
    let runner = ScriptedRunner::new().on(
        "docker info",
        err_output(b"Cannot connect to the Docker daemon at unix:///var/run/docker.sock"),
    );

    let report = probe(&runner, &RecordingReporter::default(), ComposeFlavor::Auto).await;

    assert_eq!(report.status, ProbeStatus::Fail);
    assert!(!report.ok());
    assert!(report.message.starts_with(DOCKER_UNAVAILABLE_HINT));
    assert!(report.message.contains("Cannot connect to the Docker daemon"));
    assert_eq!(runner.calls(), vec!["docker info"]);
}

#[tokio::test]
async fn probe_fails_when_docker_not_installed() {
    let runner = ScriptedRunner::new();

    let report = probe(&runner, &RecordingReporter::default(), ComposeFlavor::Auto).await;

    assert_eq!(report.status, ProbeStatus::Fail);
    assert!(report.message.contains("No such file or directory"));
}

#[tokio::test]
async fn probe_fails_when_version_unreadable() {
    let runner = ScriptedRunner::new()
        .on("docker info", ok_output(b""))
        .on(
            "docker version --format {{.Server.Version}}",
            ok_output(b"  \n"),
        );

    let report = probe(&runner, &RecordingReporter::default(), ComposeFlavor::Auto).await;

    assert_eq!(report.status, ProbeStatus::Fail);
    assert_eq!(report.message, "Cannot retrieve Docker version.");
    assert!(!runner.calls().iter().any(|c| c.contains("compose")));
}

#[tokio::test]
async fn probe_reports_each_step() {
    let reporter = RecordingReporter::default();
    probe(&healthy_docker(), &reporter, ComposeFlavor::Auto).await;

    assert_eq!(
        reporter.messages(),
        vec![
            "step: checking Docker daemon...",
            "step: reading Docker version...",
            "step: reading Docker Compose version...",
        ]
    );
}
