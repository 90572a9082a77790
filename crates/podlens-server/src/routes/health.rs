// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
	pub version: &'static str,
}

/// GET /health - liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "healthy",
		version: env!("CARGO_PKG_VERSION"),
	})
}
