//! Route handlers for the status page, container search and health check.
//!
//! `search` always answers 200; failures and empty results travel in the
//! `error` and `warning` fields of the JSON body.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;
use serde_json::{Value, json};

use super::WebState;
use super::page::render_index;
use crate::application::ports::ContainerEngine;
use crate::application::services::containers;

/// Body of `/search` when the `container` parameter is missing.
pub const NO_SUCH_RESOURCE: &str = "No Such Resource.";

/// Query string of `/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Image substring to match.
    pub container: Option<String>,
}

pub(super) async fn index<E: ContainerEngine>(State(state): State<Arc<WebState<E>>>) -> Html<String> {
    Html(render_index(&state.env))
}

/// Always answers 200; failures are reported in an `error` field.
pub(super) async fn search<E: ContainerEngine>(
    State(state): State<Arc<WebState<E>>>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    let Some(needle) = params.container else {
        return Json(json!({ "error": NO_SUCH_RESOURCE }));
    };

    match containers::find_by_image(&state.engine, &needle).await {
        Ok(lookup) => match serde_json::to_value(&lookup) {
            Ok(value) => Json(value),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize container lookup");
                Json(json!({ "error": e.to_string() }))
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, needle = %needle, "container search failed");
            Json(json!({ "error": e.to_string() }))
        }
    }
}

/// Minimal health-check handler for load-balancer probes.
pub(super) async fn health() -> StatusCode {
    StatusCode::OK
}
