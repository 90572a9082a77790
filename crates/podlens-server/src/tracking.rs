// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request tracking middleware for the MCP endpoints.
//!
//! Wraps the whole router so it runs before routing: the root path is
//! rewritten onto the SSE path there, and each MCP request is counted once
//! and holds a [`ConnectionGuard`] while its response is alive.

use std::sync::Arc;

use axum::{
	body::Body,
	extract::{Request, State},
	http::{uri::PathAndQuery, Uri},
	middleware::{self, Next},
	response::Response,
	Router,
};
use futures::StreamExt;
use podlens_server_config::McpConfig;

use crate::metrics::{ConnectionGuard, Endpoint, Metrics};

/// The paths the MCP transport is mounted on.
#[derive(Debug, Clone)]
pub struct McpRoutes {
	pub sse_path: String,
	pub message_path: String,
}

impl McpRoutes {
	pub fn classify(&self, path: &str) -> Option<Endpoint> {
		if path == self.sse_path {
			Some(Endpoint::Sse)
		} else if path == self.message_path {
			Some(Endpoint::Message)
		} else if path == "/" {
			Some(Endpoint::Root)
		} else {
			None
		}
	}
}

impl From<&McpConfig> for McpRoutes {
	fn from(config: &McpConfig) -> Self {
		Self {
			sse_path: config.sse_path.clone(),
			message_path: config.message_path.clone(),
		}
	}
}

#[derive(Clone)]
struct TrackingState {
	metrics: Arc<Metrics>,
	routes: Arc<McpRoutes>,
}

/// Wrap `inner` so every MCP request is tracked before it is routed.
pub fn with_request_tracking(inner: Router, metrics: Arc<Metrics>, routes: McpRoutes) -> Router {
	let state = TrackingState {
		metrics,
		routes: Arc::new(routes),
	};
	Router::new()
		.fallback_service(inner)
		.layer(middleware::from_fn_with_state(state, track_mcp_request))
}

async fn track_mcp_request(
	State(state): State<TrackingState>,
	mut req: Request,
	next: Next,
) -> Response {
	let Some(endpoint) = state.routes.classify(req.uri().path()) else {
		return next.run(req).await;
	};

	state.metrics.record_request(endpoint);
	let guard = state.metrics.connection();

	if endpoint == Endpoint::Root {
		rewrite_path(&mut req, &state.routes.sse_path);
	}

	tracing::debug!(endpoint = endpoint.label(), method = %req.method(), "mcp request");
	let response = next.run(req).await;

	if endpoint.is_stream() {
		hold_until_body_dropped(response, guard)
	} else {
		response
	}
}

/// Keep `guard` alive for as long as the response body is being streamed.
fn hold_until_body_dropped(response: Response, guard: ConnectionGuard) -> Response {
	let (parts, body) = response.into_parts();
	let stream = body.into_data_stream().map(move |chunk| {
		let _held = &guard;
		chunk
	});
	Response::from_parts(parts, Body::from_stream(stream))
}

fn rewrite_path(req: &mut Request, path: &str) {
	let path_and_query = match req.uri().query() {
		Some(query) => format!("{path}?{query}"),
		None => path.to_string(),
	};
	let Ok(path_and_query) = path_and_query.parse::<PathAndQuery>() else {
		tracing::warn!(path, "cannot rewrite request onto SSE path");
		return;
	};

	let mut parts = req.uri().clone().into_parts();
	parts.path_and_query = Some(path_and_query);
	match Uri::from_parts(parts) {
		Ok(uri) => *req.uri_mut() = uri,
		Err(e) => tracing::warn!(error = %e, "cannot rewrite request onto SSE path"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{
		http::StatusCode,
		routing::{get, post},
	};
	use tower::ServiceExt;

	fn routes() -> McpRoutes {
		McpRoutes {
			sse_path: "/sse".to_string(),
			message_path: "/message".to_string(),
		}
	}

	fn tracked_app(metrics: Arc<Metrics>) -> Router {
		let inner = Router::new()
			.route("/sse", get(|| async { "event: endpoint\ndata: /message\n\n" }))
			.route("/message", post(|| async { StatusCode::ACCEPTED }))
			.route("/health", get(|| async { "ok" }));
		with_request_tracking(inner, metrics, routes())
	}

	fn request(method: &str, uri: &str) -> Request {
		Request::builder()
			.method(method)
			.uri(uri)
			.body(Body::empty())
			.unwrap()
	}

	#[test]
	fn classify_paths() {
		let routes = routes();
		assert_eq!(routes.classify("/sse"), Some(Endpoint::Sse));
		assert_eq!(routes.classify("/message"), Some(Endpoint::Message));
		assert_eq!(routes.classify("/"), Some(Endpoint::Root));
		assert_eq!(routes.classify("/metrics"), None);
		assert_eq!(routes.classify("/sse/extra"), None);
	}

	#[tokio::test]
	async fn root_serves_the_sse_stream() {
		let metrics = Arc::new(Metrics::new().unwrap());
		let response = tracked_app(Arc::clone(&metrics))
			.oneshot(request("GET", "/"))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		let body = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		assert!(body.starts_with(b"event: endpoint"));
		assert_eq!(metrics.requests(Endpoint::Root), 1);
		assert_eq!(metrics.requests(Endpoint::Sse), 0);
	}

	#[tokio::test]
	async fn stream_holds_connection_until_body_dropped() {
		let metrics = Arc::new(Metrics::new().unwrap());
		let response = tracked_app(Arc::clone(&metrics))
			.oneshot(request("GET", "/sse"))
			.await
			.unwrap();
		assert_eq!(metrics.active_connections(), 1);

		drop(response);
		assert_eq!(metrics.active_connections(), 0);
	}

	#[tokio::test]
	async fn failed_requests_are_still_counted() {
		let metrics = Arc::new(Metrics::new().unwrap());
		let response = tracked_app(Arc::clone(&metrics))
			.oneshot(request("GET", "/message"))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(metrics.requests(Endpoint::Message), 1);
		assert_eq!(metrics.active_connections(), 0);
	}

	#[tokio::test]
	async fn untracked_paths_are_passed_through() {
		let metrics = Arc::new(Metrics::new().unwrap());
		let response = tracked_app(Arc::clone(&metrics))
			.oneshot(request("GET", "/health"))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		for endpoint in Endpoint::ALL {
			assert_eq!(metrics.requests(endpoint), 0);
		}
	}

	#[tokio::test]
	async fn concurrent_calls_leave_gauge_at_zero() {
		const CALLS: u64 = 32;
		let metrics = Arc::new(Metrics::new().unwrap());
		let app = tracked_app(Arc::clone(&metrics));

		let mut tasks = tokio::task::JoinSet::new();
		for i in 0..CALLS {
			let app = app.clone();
			tasks.spawn(async move {
				let uri = if i % 2 == 0 { "/sse" } else { "/message?sessionId=abc" };
				let method = if i % 2 == 0 { "GET" } else { "POST" };
				let response = app.oneshot(request(method, uri)).await.unwrap();
				axum::body::to_bytes(response.into_body(), usize::MAX)
					.await
					.unwrap();
			});
		}
		while let Some(joined) = tasks.join_next().await {
			joined.unwrap();
		}

		assert_eq!(metrics.active_connections(), 0);
		assert_eq!(metrics.requests(Endpoint::Sse), CALLS / 2);
		assert_eq!(metrics.requests(Endpoint::Message), CALLS / 2);
	}
}
