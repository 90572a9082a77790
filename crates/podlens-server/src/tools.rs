// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Pod query tools.
//!
//! Each tool decodes its untyped argument map into a [`PodQuery`], makes one
//! call to the [`K8sClient`], sanitizes what comes back and renders it as
//! pretty-printed JSON. Every failure is folded into [`ToolResult::Error`];
//! nothing here returns a transport-level error.

use podlens_k8s::{sanitize_pod, sanitize_pods, K8sClient, K8sError};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

pub const GET_POD_DETAILS: &str = "get_pod_details";
pub const GET_PODS_BY_LABEL: &str = "get_pods_by_label";
pub const DEFAULT_NAMESPACE: &str = "default";

/// Arguments as they arrive from the transport.
pub type ToolArguments = Map<String, Value>;

/// Outcome of a tool call as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResult {
	/// JSON document (a pod or an array of pods).
	Success(String),
	/// Human-readable failure message.
	Error(String),
}

impl ToolResult {
	pub fn is_error(&self) -> bool {
		matches!(self, ToolResult::Error(_))
	}

	pub fn text(&self) -> &str {
		match self {
			ToolResult::Success(text) | ToolResult::Error(text) => text,
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
	#[error("{0} is required")]
	MissingArgument(&'static str),

	#[error("invalid arguments for {tool}: {message}")]
	InvalidArguments { tool: &'static str, message: String },

	#[error("failed to get pod {namespace}/{name}: {source}")]
	GetPod {
		name: String,
		namespace: String,
		#[source]
		source: K8sError,
	},

	#[error("failed to list pods with selector '{selector}': {source}")]
	ListPods {
		selector: String,
		#[source]
		source: K8sError,
	},

	#[error("failed to serialize pod data")]
	Serialization(#[source] serde_json::Error),
}

/// A validated pod query.
///
/// Blank arguments (empty or whitespace-only) count as missing: a blank
/// `podName` or `labelSelector` is rejected and a blank namespace falls back
/// to `default`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodQuery {
	ByName { name: String, namespace: String },
	ByLabel { selector: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GetPodDetailsArgs {
	#[serde(rename = "podName", default)]
	pod_name: Option<String>,
	#[serde(default)]
	namespace: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GetPodsByLabelArgs {
	#[serde(rename = "labelSelector", default)]
	label_selector: Option<String>,
}

impl PodQuery {
	/// Decode `get_pod_details` arguments. A missing or empty namespace
	/// falls back to `default`.
	pub fn by_name(args: Option<ToolArguments>) -> Result<Self, ToolError> {
		let args: GetPodDetailsArgs = decode(GET_POD_DETAILS, args)?;
		let name = non_empty(args.pod_name).ok_or(ToolError::MissingArgument("podName"))?;
		let namespace =
			non_empty(args.namespace).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
		Ok(PodQuery::ByName { name, namespace })
	}

	/// Decode `get_pods_by_label` arguments.
	pub fn by_label(args: Option<ToolArguments>) -> Result<Self, ToolError> {
		let args: GetPodsByLabelArgs = decode(GET_PODS_BY_LABEL, args)?;
		let selector =
			non_empty(args.label_selector).ok_or(ToolError::MissingArgument("labelSelector"))?;
		Ok(PodQuery::ByLabel { selector })
	}
}

fn decode<T: DeserializeOwned>(
	tool: &'static str,
	args: Option<ToolArguments>,
) -> Result<T, ToolError> {
	serde_json::from_value(Value::Object(args.unwrap_or_default())).map_err(|e| {
		ToolError::InvalidArguments {
			tool,
			message: e.to_string(),
		}
	})
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

/// Run a validated query and render the sanitized result as JSON.
pub async fn run_query(client: &dyn K8sClient, query: &PodQuery) -> Result<String, ToolError> {
	match query {
		PodQuery::ByName { name, namespace } => {
			let mut pod = client
				.get_pod(name, namespace)
				.await
				.map_err(|source| ToolError::GetPod {
					name: name.clone(),
					namespace: namespace.clone(),
					source,
				})?;
			sanitize_pod(&mut pod);
			serde_json::to_string_pretty(&pod).map_err(ToolError::Serialization)
		}
		PodQuery::ByLabel { selector } => {
			let mut pods = client
				.list_pods_all_namespaces(selector)
				.await
				.map_err(|source| ToolError::ListPods {
					selector: selector.clone(),
					source,
				})?;
			debug!(count = pods.len(), "pods matched selector");
			sanitize_pods(&mut pods);
			serde_json::to_string_pretty(&pods).map_err(ToolError::Serialization)
		}
	}
}

/// `get_pod_details(podName, namespace = "default")`
#[instrument(skip_all, fields(tool = GET_POD_DETAILS))]
pub async fn get_pod_details(client: &dyn K8sClient, args: Option<ToolArguments>) -> ToolResult {
	execute(client, PodQuery::by_name(args)).await
}

/// `get_pods_by_label(labelSelector)`
#[instrument(skip_all, fields(tool = GET_PODS_BY_LABEL))]
pub async fn get_pods_by_label(client: &dyn K8sClient, args: Option<ToolArguments>) -> ToolResult {
	execute(client, PodQuery::by_label(args)).await
}

async fn execute(client: &dyn K8sClient, query: Result<PodQuery, ToolError>) -> ToolResult {
	let result = match query {
		Ok(query) => run_query(client, &query).await,
		Err(e) => Err(e),
	};

	match result {
		Ok(json) => ToolResult::Success(json),
		Err(e) => {
			warn!(error = %e, "tool call failed");
			ToolResult::Error(e.to_string())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn args(value: Value) -> Option<ToolArguments> {
		match value {
			Value::Object(map) => Some(map),
			_ => None,
		}
	}

	#[test]
	fn by_name_defaults_namespace() {
		let query = PodQuery::by_name(args(json!({ "podName": "web-0" }))).unwrap();
		assert_eq!(
			query,
			PodQuery::ByName {
				name: "web-0".to_string(),
				namespace: "default".to_string(),
			}
		);
	}

	#[test]
	fn by_name_treats_empty_namespace_as_default() {
		let query =
			PodQuery::by_name(args(json!({ "podName": "web-0", "namespace": "" }))).unwrap();
		assert!(matches!(query, PodQuery::ByName { ref namespace, .. } if namespace == "default"));
	}

	#[test]
	fn by_name_keeps_explicit_namespace() {
		let query =
			PodQuery::by_name(args(json!({ "podName": "coredns-1", "namespace": "kube-system" })))
				.unwrap();
		assert!(
			matches!(query, PodQuery::ByName { ref namespace, .. } if namespace == "kube-system")
		);
	}

	#[test]
	fn by_name_requires_pod_name() {
		for value in [json!({}), json!({ "podName": "" }), json!({ "podName": "  " })] {
			let err = PodQuery::by_name(args(value)).unwrap_err();
			assert!(matches!(err, ToolError::MissingArgument("podName")));
		}
		assert!(PodQuery::by_name(None).is_err());
	}

	#[test]
	fn by_label_requires_selector() {
		let err = PodQuery::by_label(args(json!({ "labelSelector": "" }))).unwrap_err();
		assert_eq!(err.to_string(), "labelSelector is required");
	}

	#[test]
	fn blank_arguments_count_as_missing() {
		let err = PodQuery::by_label(args(json!({ "labelSelector": " \t" }))).unwrap_err();
		assert!(matches!(err, ToolError::MissingArgument("labelSelector")));

		let query =
			PodQuery::by_name(args(json!({ "podName": "web-0", "namespace": "  " }))).unwrap();
		assert!(matches!(query, PodQuery::ByName { ref namespace, .. } if namespace == "default"));
	}

	#[test]
	fn unknown_arguments_are_rejected() {
		let err = PodQuery::by_label(args(json!({ "labelSelector": "app=nginx", "limit": 5 })))
			.unwrap_err();
		assert!(matches!(err, ToolError::InvalidArguments { tool: GET_PODS_BY_LABEL, .. }));
	}

	#[test]
	fn wrong_argument_type_is_rejected() {
		let err = PodQuery::by_name(args(json!({ "podName": 42 }))).unwrap_err();
		assert!(matches!(err, ToolError::InvalidArguments { tool: GET_POD_DETAILS, .. }));
	}

	#[test]
	fn tool_result_text() {
		assert_eq!(ToolResult::Success("[]".to_string()).text(), "[]");
		assert!(ToolResult::Error("boom".to_string()).is_error());
	}
}
