// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP router assembly.

use std::sync::Arc;

use axum::{routing::get, Router};
use podlens_server_config::McpConfig;
use tower_http::trace::TraceLayer;

use crate::metrics::Metrics;
use crate::routes;
use crate::tracking::{with_request_tracking, McpRoutes};

/// Shared state for the server's own routes.
#[derive(Clone)]
pub struct AppState {
	pub metrics: Arc<Metrics>,
}

/// Combine the MCP transport routes with the server's own routes.
///
/// `mcp_routes` must serve the SSE stream on `mcp.sse_path` and accept
/// messages on `mcp.message_path`. Requests to `/` are served by the SSE
/// route.
pub fn create_router(state: AppState, mcp: &McpConfig, mcp_routes: Router) -> Router {
	let metrics = Arc::clone(&state.metrics);

	let app = Router::new()
		.route("/metrics", get(routes::metrics::prometheus_metrics))
		.route("/health", get(routes::health::health_check))
		.with_state(state)
		.merge(mcp_routes)
		.layer(TraceLayer::new_for_http());

	with_request_tracking(app, metrics, McpRoutes::from(mcp))
}
