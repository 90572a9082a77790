// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for podlens-server.

pub mod http;
pub mod kube;
pub mod logging;
pub mod mcp;

pub use http::{HttpConfig, HttpConfigLayer};
pub use kube::{KubeConfig, KubeConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use mcp::{McpConfig, McpConfigLayer};
