// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cluster credential configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Default kubeconfig location: `$HOME/.kube/config`.
pub fn default_kubeconfig_path() -> Option<PathBuf> {
	dirs::home_dir().map(|home| home.join(".kube").join("config"))
}

/// Cluster credential configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct KubeConfig {
	/// Try the pod's service account before reading a kubeconfig file.
	pub in_cluster: bool,
	/// Kubeconfig used as the fallback. `None` only when no home directory
	/// can be determined and nothing was configured.
	pub kubeconfig: Option<PathBuf>,
}

impl Default for KubeConfig {
	fn default() -> Self {
		KubeConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KubeConfigLayer {
	#[serde(default)]
	pub in_cluster: Option<bool>,
	#[serde(default)]
	pub kubeconfig: Option<PathBuf>,
}

impl KubeConfigLayer {
	pub fn merge(&mut self, other: KubeConfigLayer) {
		if other.in_cluster.is_some() {
			self.in_cluster = other.in_cluster;
		}
		if other.kubeconfig.is_some() {
			self.kubeconfig = other.kubeconfig;
		}
	}

	pub fn finalize(self) -> KubeConfig {
		KubeConfig {
			in_cluster: self.in_cluster.unwrap_or(true),
			kubeconfig: self.kubeconfig.or_else(default_kubeconfig_path),
		}
	}
}
