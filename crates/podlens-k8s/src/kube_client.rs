// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::{
	api::{Api, ListParams},
	config::{KubeConfigOptions, Kubeconfig},
	Client, Config,
};
use tracing::{debug, info, instrument};

use crate::client::K8sClient;
use crate::error::K8sError;

/// How the production client locates cluster credentials.
#[derive(Debug, Clone)]
pub struct KubeConnectOptions {
	/// Try the in-cluster service account before the kubeconfig file.
	pub in_cluster: bool,
	/// Kubeconfig file used when in-cluster credentials are unavailable.
	pub kubeconfig: Option<PathBuf>,
}

impl Default for KubeConnectOptions {
	fn default() -> Self {
		Self {
			in_cluster: true,
			kubeconfig: None,
		}
	}
}

/// Production K8s client implementation using the kube crate.
pub struct KubeClient {
	client: Client,
}

impl KubeClient {
	/// Create a new KubeClient, resolving credentials in this order:
	/// 1. In-cluster service account (when `in_cluster` is set)
	/// 2. The kubeconfig file at `opts.kubeconfig`
	pub async fn connect(opts: &KubeConnectOptions) -> Result<Self, K8sError> {
		let config = resolve_config(opts).await?;
		let client = Client::try_from(config).map_err(|e| K8sError::Config {
			message: e.to_string(),
		})?;
		debug!("K8s client initialized");
		Ok(Self { client })
	}
}

async fn resolve_config(opts: &KubeConnectOptions) -> Result<Config, K8sError> {
	if opts.in_cluster {
		match Config::incluster() {
			Ok(config) => {
				info!("using in-cluster service account credentials");
				return Ok(config);
			}
			Err(e) => {
				debug!(error = %e, "in-cluster credentials unavailable, falling back to kubeconfig");
			}
		}
	}

	let path = opts.kubeconfig.as_ref().ok_or_else(|| K8sError::Config {
		message: "in-cluster credentials unavailable and no kubeconfig path configured".to_string(),
	})?;

	let kubeconfig = Kubeconfig::read_from(path).map_err(|e| K8sError::Config {
		message: format!("failed to read kubeconfig {}: {e}", path.display()),
	})?;
	let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
		.await
		.map_err(|e| K8sError::Config {
			message: format!("invalid kubeconfig {}: {e}", path.display()),
		})?;

	info!(path = %path.display(), "using kubeconfig credentials");
	Ok(config)
}

#[async_trait]
impl K8sClient for KubeClient {
	#[instrument(skip(self))]
	async fn get_pod(&self, name: &str, namespace: &str) -> Result<Pod, K8sError> {
		let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
		match pods.get(name).await {
			Ok(pod) => Ok(pod),
			Err(kube::Error::Api(err)) if err.code == 404 => Err(K8sError::PodNotFound {
				name: name.into(),
				namespace: namespace.into(),
			}),
			Err(e) => Err(e.into()),
		}
	}

	#[instrument(skip(self))]
	async fn list_pods_all_namespaces(&self, label_selector: &str) -> Result<Vec<Pod>, K8sError> {
		let pods: Api<Pod> = Api::all(self.client.clone());
		let lp = ListParams::default().labels(label_selector);
		let pod_list = pods.list(&lp).await?;
		debug!(count = pod_list.items.len(), "listed pods");
		Ok(pod_list.items)
	}
}
