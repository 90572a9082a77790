// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the podlens server.
//!
//! Sources, lowest to highest precedence: built-in defaults, a TOML file,
//! environment variables (`PODLENS_SERVER_*` and `KUBECONFIG`).
//!
//! # Usage
//!
//! ```ignore
//! use podlens_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::debug;

/// Paths owned by the server itself; the MCP transport may not claim them.
const RESERVED_PATHS: &[&str] = &["/", "/metrics", "/health"];

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub kube: KubeConfig,
	pub mcp: McpConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables
/// 2. Config file (`/etc/podlens/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let kube = layer.kube.unwrap_or_default().finalize();
	let mcp = layer.mcp.unwrap_or_default().finalize();

	validate_mcp(&mcp)?;

	Ok(ServerConfig {
		http,
		logging,
		kube,
		mcp,
	})
}

/// Validate the MCP route layout.
fn validate_mcp(mcp: &McpConfig) -> Result<(), ConfigError> {
	for (key, path) in [("mcp.sse_path", &mcp.sse_path), ("mcp.message_path", &mcp.message_path)] {
		if !path.starts_with('/') {
			return Err(ConfigError::InvalidValue {
				key: key.to_string(),
				message: format!("path '{path}' must start with '/'"),
			});
		}
		if RESERVED_PATHS.contains(&path.as_str()) {
			return Err(ConfigError::InvalidValue {
				key: key.to_string(),
				message: format!("path '{path}' is reserved"),
			});
		}
	}

	if mcp.sse_path == mcp.message_path {
		return Err(ConfigError::Validation(format!(
			"mcp.sse_path and mcp.message_path must differ (both are '{}')",
			mcp.sse_path
		)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_finalize_defaults() {
		let config = finalize(ServerConfigLayer::default()).unwrap();
		assert_eq!(config.socket_addr(), "0.0.0.0:8080");
		assert_eq!(config.mcp.sse_path, "/sse");
		assert_eq!(config.mcp.message_path, "/message");
		assert!(config.kube.in_cluster);
	}

	#[test]
	fn test_relative_path_rejected() {
		let layer = ServerConfigLayer {
			mcp: Some(McpConfigLayer {
				sse_path: Some("sse".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let err = finalize(layer).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "mcp.sse_path"));
	}

	#[test]
	fn test_reserved_path_rejected() {
		let layer = ServerConfigLayer {
			mcp: Some(McpConfigLayer {
				message_path: Some("/metrics".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(finalize(layer).is_err());
	}

	#[test]
	fn test_identical_paths_rejected() {
		let layer = ServerConfigLayer {
			mcp: Some(McpConfigLayer {
				sse_path: Some("/mcp".to_string()),
				message_path: Some("/mcp".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(matches!(
			finalize(layer).unwrap_err(),
			ConfigError::Validation(_)
		));
	}

	#[test]
	fn test_load_config_with_file() {
		use std::io::Write;

		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[http]
host = "127.0.0.1"

[logging]
level = "debug"
"#
		)
		.unwrap();

		let config = load_config_with_file(file.path()).unwrap();
		// Environment may override these in CI; only assert file-only keys
		// when the matching variables are unset.
		if std::env::var("PODLENS_SERVER_HOST").is_err() {
			assert_eq!(config.http.host, "127.0.0.1");
		}
		if std::env::var("PODLENS_SERVER_LOG_LEVEL").is_err() {
			assert_eq!(config.logging.level, "debug");
		}
	}
}
