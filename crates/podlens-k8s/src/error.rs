// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors that can occur during K8s operations.
#[derive(Error, Debug)]
pub enum K8sError {
	#[error("K8s API error: {message}")]
	ApiError { message: String },

	#[error("Pod not found: {namespace}/{name}")]
	PodNotFound { name: String, namespace: String },

	#[error("K8s client configuration error: {message}")]
	Config { message: String },
}

impl From<kube::Error> for K8sError {
	fn from(err: kube::Error) -> Self {
		K8sError::ApiError {
			message: err.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pod_not_found_message_names_the_pod() {
		let err = K8sError::PodNotFound {
			name: "nginx-7c5ddbdf54-x2k9p".to_string(),
			namespace: "web".to_string(),
		};
		assert_eq!(err.to_string(), "Pod not found: web/nginx-7c5ddbdf54-x2k9p");
	}

	#[test]
	fn api_error_carries_message() {
		let err = K8sError::ApiError {
			message: "pods is forbidden".to_string(),
		};
		assert!(err.to_string().contains("pods is forbidden"));
	}
}
