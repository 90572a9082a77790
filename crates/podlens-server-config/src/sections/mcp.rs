// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! MCP SSE transport configuration.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SSE_PATH: &str = "/sse";
pub const DEFAULT_MESSAGE_PATH: &str = "/message";
pub const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;

/// MCP transport configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct McpConfig {
	pub sse_path: String,
	pub message_path: String,
	/// Interval between SSE keep-alive pings; `None` disables them.
	pub sse_keep_alive: Option<Duration>,
}

impl Default for McpConfig {
	fn default() -> Self {
		McpConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct McpConfigLayer {
	#[serde(default)]
	pub sse_path: Option<String>,
	#[serde(default)]
	pub message_path: Option<String>,
	#[serde(default)]
	pub sse_keep_alive_secs: Option<u64>,
}

impl McpConfigLayer {
	pub fn merge(&mut self, other: McpConfigLayer) {
		if other.sse_path.is_some() {
			self.sse_path = other.sse_path;
		}
		if other.message_path.is_some() {
			self.message_path = other.message_path;
		}
		if other.sse_keep_alive_secs.is_some() {
			self.sse_keep_alive_secs = other.sse_keep_alive_secs;
		}
	}

	pub fn finalize(self) -> McpConfig {
		let keep_alive = self
			.sse_keep_alive_secs
			.unwrap_or(DEFAULT_SSE_KEEP_ALIVE_SECS);
		McpConfig {
			sse_path: self
				.sse_path
				.unwrap_or_else(|| DEFAULT_SSE_PATH.to_string()),
			message_path: self
				.message_path
				.unwrap_or_else(|| DEFAULT_MESSAGE_PATH.to_string()),
			sse_keep_alive: (keep_alive > 0).then(|| Duration::from_secs(keep_alive)),
		}
	}
}
