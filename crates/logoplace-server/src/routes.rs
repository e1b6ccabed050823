// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP routes — placement analysis, health, and output cleanup.
//
// Status mapping for `/analyze-placement`:
//   200  successful decision
//   422  failed decision (download failure, no corner, space, confidence)
//   400  missing body or required field
//   500  the pipeline itself crashed; body keeps the decision shape

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use logoplace_core::{PlacementDecision, PlacementRequest};
use logoplace_vision::{LogoSource, PlacementJob};
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument};

use crate::services::fetch::fetch_error_detail;
use crate::state::AppState;

const REQUIRED_FIELDS: [&str; 3] = ["image_url", "dark_logo_url", "light_logo_url"];

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze-placement", post(analyze_placement))
        .route("/health", get(health))
        .route("/cleanup", post(cleanup))
        .with_state(state)
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message.into() }))).into_response()
}

/// Parse a JSON object body, or explain why it is not one.
fn json_object(body: &Bytes) -> Result<serde_json::Map<String, Value>, Response> {
    if body.is_empty() {
        return Err(bad_request("No JSON data provided"));
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(bad_request("No JSON data provided")),
        Err(e) => Err(bad_request(format!("Invalid JSON body: {e}"))),
    }
}

fn parse_request(body: &Bytes) -> Result<PlacementRequest, Response> {
    let object = json_object(body)?;
    if let Some(field) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
        return Err(bad_request(format!("Missing required field: {field}")));
    }
    serde_json::from_value(Value::Object(object))
        .map_err(|e| bad_request(format!("Invalid request: {e}")))
}

#[instrument(skip_all)]
async fn analyze_placement(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(image_url = %request.image_url, "Placement requested");

    let (image, dark, light) = tokio::join!(
        state.fetcher.fetch(&request.image_url),
        state.fetcher.fetch(&request.dark_logo_url),
        state.fetcher.fetch(&request.light_logo_url),
    );
    // A missing logo only matters if it is the variant that gets selected.
    let logo = |url: String, fetched: logoplace_core::error::Result<Vec<u8>>| match fetched {
        Ok(bytes) => LogoSource::new(url, Some(bytes)),
        Err(e) => {
            debug!(%url, error = %e, "Logo unavailable");
            LogoSource::new(url, None)
        }
    };

    let job = PlacementJob {
        image: image.map_err(|e| fetch_error_detail(&e)),
        image_url: request.image_url,
        dark_logo: logo(request.dark_logo_url, dark),
        light_logo: logo(request.light_logo_url, light),
        return_image: request.return_image,
        upload_to_s3: request.upload_to_s3,
    };

    let engine = state.engine.clone();
    match tokio::task::spawn_blocking(move || engine.run(job)).await {
        Ok(report) => {
            let status = if report.decision.is_successful() {
                StatusCode::OK
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            (status, Json(report.decision)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Placement pipeline crashed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PlacementDecision::fault(e.to_string())),
            )
                .into_response()
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "logo-placement-analyzer" }))
}

#[instrument(skip_all)]
async fn cleanup(State(state): State<AppState>, body: Bytes) -> Response {
    let object = match json_object(&body) {
        Ok(object) => object,
        Err(response) => return response,
    };
    let files: Vec<String> = match object.get("files") {
        Some(Value::String(file)) => vec![file.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(file) => file.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => return bad_request("No files specified"),
    };

    let outputs = state.outputs.clone();
    match tokio::task::spawn_blocking(move || outputs.cleanup(&files)).await {
        Ok(report) => {
            info!(deleted = report.deleted.len(), errors = report.errors.len(), "Cleanup finished");
            Json(report).into_response()
        }
        Err(e) => {
            error!(error = %e, "Cleanup crashed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
