// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! podlens server.
//!
//! Exposes read-only K8s pod queries as MCP tools over an SSE transport,
//! with Prometheus metrics for MCP connections and requests.

pub mod api;
pub mod error;
pub mod mcp;
pub mod metrics;
pub mod routes;
pub mod tools;
pub mod tracking;

pub use api::{create_router, AppState};
pub use error::ServerError;
pub use mcp::PodToolServer;
pub use metrics::{ConnectionGuard, Endpoint, Metrics};
pub use podlens_server_config::ServerConfig;
pub use tools::{PodQuery, ToolError, ToolResult};
