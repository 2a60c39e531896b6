// Copyright 2026 Fake Extract API Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface of the fake extraction API.
//!
//! A single route, `POST /extract`. The endpoint always answers 200 with
//! the assembled JSON; the fetched page's own status is reported inside
//! the body as `statusCode`.

use crate::api::{handle_request, AppState, ExtractRequest, ExtractResponse};
use crate::config::ServerConfig;
use crate::error::ApiError;
use anyhow::Context;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Build the axum Router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/extract", post(extract))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until the process exits.
pub async fn start(config: &ServerConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;

    println!("Endpoint: {}", ServerConfig::endpoint_url(local));
    tracing::info!("extract API listening on http://{local}");

    serve(listener, state).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    axum::serve(listener, router(state))
        .await
        .context("server error")?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────

async fn extract(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    tracing::debug!(url = %request.url, fields = request.fields.len(), "extract request");
    let response = handle_request(&state, &request).await?;
    Ok(Json(response))
}
