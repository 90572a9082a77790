// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Prometheus metrics for MCP connections and requests.

use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// MCP endpoints whose traffic is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// The SSE event stream.
	Sse,
	/// Posted tool-call messages.
	Message,
	/// The root path, which serves the SSE stream for clients that expect it there.
	Root,
}

impl Endpoint {
	pub const ALL: [Endpoint; 3] = [Endpoint::Sse, Endpoint::Message, Endpoint::Root];

	pub fn label(self) -> &'static str {
		match self {
			Endpoint::Sse => "sse",
			Endpoint::Message => "message",
			Endpoint::Root => "root",
		}
	}

	/// Whether the response is a long-lived event stream.
	pub fn is_stream(self) -> bool {
		matches!(self, Endpoint::Sse | Endpoint::Root)
	}
}

/// Process-wide MCP metrics, registered on a registry owned by this value.
///
/// Built once in `main` and shared through `Arc`; nothing here touches the
/// prometheus default registry.
pub struct Metrics {
	registry: Registry,
	active_connections: IntGauge,
	requests_total: IntCounterVec,
}

impl Metrics {
	pub fn new() -> Result<Self, prometheus::Error> {
		let registry = Registry::new();

		let active_connections =
			IntGauge::new("mcp_active_connections", "Number of active MCP connections")?;
		registry.register(Box::new(active_connections.clone()))?;

		let requests_total = IntCounterVec::new(
			Opts::new("mcp_requests_total", "Total number of MCP requests"),
			&["endpoint"],
		)?;
		registry.register(Box::new(requests_total.clone()))?;

		// Pre-create every label so all endpoints are exported from the start.
		for endpoint in Endpoint::ALL {
			requests_total.with_label_values(&[endpoint.label()]);
		}

		Ok(Self {
			registry,
			active_connections,
			requests_total,
		})
	}

	/// Count one inbound request on `endpoint`.
	pub fn record_request(&self, endpoint: Endpoint) {
		self
			.requests_total
			.with_label_values(&[endpoint.label()])
			.inc();
	}

	/// Mark a connection as active until the returned guard is dropped.
	pub fn connection(&self) -> ConnectionGuard {
		ConnectionGuard::acquire(self.active_connections.clone())
	}

	pub fn active_connections(&self) -> i64 {
		self.active_connections.get()
	}

	pub fn requests(&self, endpoint: Endpoint) -> u64 {
		self
			.requests_total
			.with_label_values(&[endpoint.label()])
			.get()
	}

	/// Render all metrics in the Prometheus text exposition format.
	pub fn encode(&self) -> Result<String, prometheus::Error> {
		let encoder = TextEncoder::new();
		let metric_families = self.registry.gather();
		let mut buffer = Vec::new();
		encoder.encode(&metric_families, &mut buffer)?;
		String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
	}
}

/// Holds one unit of the active-connection gauge.
///
/// The gauge is released in `Drop`, so error returns, cancelled futures and
/// unwinding all give it back.
#[must_use = "the connection is released as soon as the guard is dropped"]
pub struct ConnectionGuard {
	gauge: IntGauge,
}

impl ConnectionGuard {
	fn acquire(gauge: IntGauge) -> Self {
		gauge.inc();
		Self { gauge }
	}
}

impl Drop for ConnectionGuard {
	fn drop(&mut self) {
		self.gauge.dec();
	}
}
