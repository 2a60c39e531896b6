// Copyright 2026 Fake Extract API Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fake web-scraping extraction API for integration tests.
//!
//! `POST /extract` fetches a URL once and returns, on request, the raw
//! body, the response headers, the decoded HTML and items extracted by the
//! fixture-site page objects.

pub mod acquisition;
pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod rest;
