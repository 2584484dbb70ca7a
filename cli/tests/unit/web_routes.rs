//! Router and server tests, driven through `tower::ServiceExt::oneshot`.

#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt as _;
use kubedash_cli::web::{NO_SUCH_RESOURCE, WebServer, WebState, router};
use kubedash_common::EnvironmentInfo;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::mocks::{StaticEngine, UnreachableEngine, container};

fn env() -> EnvironmentInfo {
    EnvironmentInfo {
        docker_version: "27.3.1".to_string(),
        docker_compose_version: "2.29.7".to_string(),
        kube_version: Some("v1.31.2".to_string()),
    }
}

fn app() -> axum::Router {
    router(Arc::new(WebState::new(
        env(),
        StaticEngine(vec![
            container("a1b2c3d4e5f6a7b8", "web", "nginx:latest"),
            container("b2c3d4e5f6a7b8c9", "cache", "redis:7"),
            container("c3d4e5f6a7b8c9d0", "proxy", "my-nginx-proxy"),
        ]),
    )))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8"))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).expect("json body"))
}

#[tokio::test]
async fn index_shows_versions() {
    let (status, body) = get(app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("27.3.1"));
    assert!(body.contains("2.29.7"));
    assert!(body.contains("v1.31.2"));
}

#[tokio::test]
async fn search_without_parameter_reports_missing_resource() {
    let (status, body) = get_json(app(), "/search").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": NO_SUCH_RESOURCE }));
    assert_eq!(body["error"], "No Such Resource.");
}

#[tokio::test]
async fn search_returns_matches_keyed_by_image() {
    let (status, body) = get_json(app(), "/search?container=nginx").await;

    assert_eq!(status, StatusCode::OK);
    let keys: Vec<_> = body.as_object().expect("object").keys().cloned().collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&"nginx:latest".to_string()));
    assert!(keys.contains(&"my-nginx-proxy".to_string()));
    assert_eq!(body["nginx:latest"]["id"], "a1b2c3d4e5f6a7b8");
}

#[tokio::test]
async fn search_without_match_returns_warning() {
    let (status, body) = get_json(app(), "/search?container=postgres").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "warning": "No container matches this condition." })
    );
}

#[tokio::test]
async fn search_with_daemon_down_reports_error_field() {
    let app = router(Arc::new(WebState::new(env(), UnreachableEngine)));

    let (status, body) = get_json(app, "/search?container=nginx").await;

    assert_eq!(status, StatusCode::OK);
    let message = body["error"].as_str().expect("error string");
    assert!(message.starts_with("Cannot connect to the Docker daemon"));
}

#[tokio::test]
async fn health_is_ok() {
    let (status, _) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get(app(), "/containers").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── WebServer ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn second_start_waits_for_first_to_stop() {
    let server = Arc::new(WebServer::new());
    let addr = "127.0.0.1:0".parse().expect("addr");
    let (stop_first, first_stopped) = tokio::sync::oneshot::channel::<()>();

    let first = tokio::spawn({
        let server = Arc::clone(&server);
        async move {
            server
                .start(addr, app(), async move {
                    let _ = first_stopped.await;
                })
                .await
        }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let second = tokio::spawn({
        let server = Arc::clone(&server);
        async move { server.start(addr, app(), async {}).await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!second.is_finished(), "second start ran while the first held the guard");

    stop_first.send(()).expect("first server is running");
    first.await.expect("join").expect("first server");
    tokio::time::timeout(Duration::from_secs(5), second)
        .await
        .expect("second start completes")
        .expect("join")
        .expect("second server");
}

#[tokio::test]
async fn start_on_taken_port_fails() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = taken.local_addr().expect("addr");

    let err = WebServer::new()
        .start(addr, app(), async {})
        .await
        .expect_err("port is taken");

    assert!(err
        .to_string()
        .starts_with(&format!("failed to create listening port on {addr}")));
}
