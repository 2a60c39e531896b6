// Copyright 2026 Fake Extract API Contributors
// SPDX-License-Identifier: Apache-2.0

//! The extract request handler.
//!
//! Fetches the target URL once and assembles the response from the fields
//! the request asked for. A field counts as requested when its key is
//! present, whatever its value; unknown keys are ignored.

use crate::acquisition::http_client::HttpClient;
use crate::error::ApiError;
use crate::extraction::{
    page_object_for, ExtractionError, ItemAdapter, PageResponse, ZyteItemAdapter,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const HTTP_RESPONSE_HEADERS: &str = "httpResponseHeaders";
pub const HTTP_RESPONSE_BODY: &str = "httpResponseBody";
pub const BROWSER_HTML: &str = "browserHtml";

/// Body of a `POST /extract` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
    /// Every other key of the request object.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ExtractRequest {
    #[cfg(test)]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style flag setter.
    #[cfg(test)]
    pub fn with(mut self, field: &str) -> Self {
        self.fields.insert(field.to_string(), Value::Bool(true));
        self
    }

    pub fn wants(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

/// One response header, as reported in `httpResponseHeaders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

/// Result of an extract call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub url: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_response_headers: Option<Vec<HeaderEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_response_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_html: Option<String>,
    /// Structured items keyed by their output field.
    #[serde(flatten)]
    pub items: BTreeMap<String, Value>,
}

impl ExtractResponse {
    fn new(url: String, status_code: u16) -> Self {
        Self {
            url,
            status_code,
            http_response_headers: None,
            http_response_body: None,
            browser_html: None,
            items: BTreeMap::new(),
        }
    }
}

/// Shared, read-only state of the server.
pub struct AppState {
    pub http: HttpClient,
    pub adapter: Arc<dyn ItemAdapter>,
}

impl AppState {
    /// State with a fresh HTTP client and the default item adapter.
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_adapter(HttpClient::new()?, Arc::new(ZyteItemAdapter)))
    }

    pub fn with_adapter(http: HttpClient, adapter: Arc<dyn ItemAdapter>) -> Self {
        Self { http, adapter }
    }
}

/// Serve one extract request.
///
/// The page is fetched exactly once. Structured extractions all read that
/// single body and run concurrently; the first failure aborts the request.
pub async fn handle_request(
    state: &AppState,
    request: &ExtractRequest,
) -> Result<ExtractResponse, ApiError> {
    let page = state.http.get(&request.url).await?;
    let mut response = ExtractResponse::new(request.url.clone(), page.status);

    if request.wants(HTTP_RESPONSE_HEADERS) {
        response.http_response_headers = Some(
            page.headers
                .iter()
                .map(|(name, value)| HeaderEntry {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
        );
    }

    if request.wants(HTTP_RESPONSE_BODY) {
        response.http_response_body = Some(STANDARD.encode(&page.body));
    }

    if request.wants(BROWSER_HTML) {
        response.browser_html = Some(page.text());
    }

    let adapter = state.adapter.as_ref();
    let extractions = request
        .fields
        .keys()
        .filter_map(|key| page_object_for(key).map(|build| (key, build)))
        .map(|(key, build)| {
            let body = page.body.clone();
            async move {
                let page_object = build(PageResponse::new(&request.url, body)?);
                let item = page_object.to_item().await?;
                tracing::debug!(key = %key, url = %request.url, "extracted item");
                Ok::<_, ExtractionError>((key.clone(), adapter.to_mapping(&item)?))
            }
        });
    response.items.extend(try_join_all(extractions).await?);

    Ok(response)
}
