// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Metrics could not be gathered or encoded.
	#[error("Metrics error: {0}")]
	Metrics(#[from] prometheus::Error),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let error = match &self {
			ServerError::Metrics(_) => "metrics_error",
		};
		tracing::error!(error = %self, "request failed");
		let body = ErrorResponse {
			error: error.to_string(),
			message: self.to_string(),
		};
		(StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
	}
}
