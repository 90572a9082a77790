// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::K8sError;
use crate::types::Pod;

/// Trait for the read-only K8s operations podlens needs.
///
/// This abstraction allows for easy mocking in tests. Implementations make a
/// single request per call and leave retries to the caller.
#[async_trait]
pub trait K8sClient: Send + Sync {
	/// Get a specific pod by name from the specified namespace.
	async fn get_pod(&self, name: &str, namespace: &str) -> Result<Pod, K8sError>;

	/// List pods across all namespaces matching the given label selector.
	///
	/// The selector is passed through untouched; the API server validates
	/// its syntax. Items are returned in the order the API server sent them.
	async fn list_pods_all_namespaces(&self, label_selector: &str) -> Result<Vec<Pod>, K8sError>;
}
