// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{api::AppState, error::ServerError};

/// GET /metrics - Prometheus metrics export endpoint.
///
/// Exposes `mcp_active_connections` and `mcp_requests_total{endpoint}`.
pub async fn prometheus_metrics(
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
	let metrics = state.metrics.encode()?;
	Ok((
		StatusCode::OK,
		[(
			axum::http::header::CONTENT_TYPE,
			"text/plain; version=0.0.4; charset=utf-8",
		)],
		metrics,
	))
}
