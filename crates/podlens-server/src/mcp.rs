// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! MCP server handler exposing the pod tools.

use std::sync::Arc;

use podlens_k8s::K8sClient;
use rmcp::{
	model::{
		CallToolRequestParam, CallToolResult, Content, JsonObject, ListToolsResult,
		PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
	},
	service::RequestContext,
	ErrorData as McpError, RoleServer, ServerHandler,
};
use serde_json::{json, Value};

use crate::tools::{self, ToolArguments, ToolResult, GET_PODS_BY_LABEL, GET_POD_DETAILS};

const INSTRUCTIONS: &str = "Read-only access to Kubernetes pods. Use get_pod_details to fetch \
	one pod by name and namespace, or get_pods_by_label to find pods in all namespaces by \
	label selector.";

impl From<ToolResult> for CallToolResult {
	fn from(result: ToolResult) -> Self {
		match result {
			ToolResult::Success(json) => CallToolResult::success(vec![Content::text(json)]),
			ToolResult::Error(message) => CallToolResult::error(vec![Content::text(message)]),
		}
	}
}

/// One instance is created per MCP session; all share the same client.
#[derive(Clone)]
pub struct PodToolServer {
	client: Arc<dyn K8sClient>,
}

impl PodToolServer {
	pub fn new(client: Arc<dyn K8sClient>) -> Self {
		Self { client }
	}

	/// The tool catalog advertised to clients.
	pub fn tools() -> Vec<Tool> {
		vec![
			Tool::new(
				GET_POD_DETAILS,
				"Get the details (spec, status) of a pod by name",
				object_schema(json!({
					"type": "object",
					"properties": {
						"podName": {
							"type": "string",
							"description": "Pod name"
						},
						"namespace": {
							"type": "string",
							"description": "Namespace (default: default)",
							"default": tools::DEFAULT_NAMESPACE
						}
					},
					"required": ["podName"],
					"additionalProperties": false
				})),
			),
			Tool::new(
				GET_PODS_BY_LABEL,
				"List pods in all namespaces that match a label selector",
				object_schema(json!({
					"type": "object",
					"properties": {
						"labelSelector": {
							"type": "string",
							"description": "Label selector (e.g. app=nginx or app.kubernetes.io/instance=nginx)"
						}
					},
					"required": ["labelSelector"],
					"additionalProperties": false
				})),
			),
		]
	}

	/// Route a tool call by name. Only an unknown tool name is a protocol
	/// error; every tool failure comes back as an error result.
	pub async fn dispatch(
		&self,
		name: &str,
		arguments: Option<ToolArguments>,
	) -> Result<CallToolResult, McpError> {
		let result = match name {
			GET_POD_DETAILS => tools::get_pod_details(self.client.as_ref(), arguments).await,
			GET_PODS_BY_LABEL => tools::get_pods_by_label(self.client.as_ref(), arguments).await,
			other => {
				tracing::warn!(tool = other, "call to unknown tool");
				return Err(McpError::invalid_params(format!("unknown tool: {other}"), None));
			}
		};
		Ok(result.into())
	}
}

fn object_schema(schema: Value) -> Arc<JsonObject> {
	match schema {
		Value::Object(map) => Arc::new(map),
		_ => Arc::new(JsonObject::new()),
	}
}

impl ServerHandler for PodToolServer {
	fn get_info(&self) -> ServerInfo {
		ServerInfo {
			capabilities: ServerCapabilities::builder().enable_tools().build(),
			instructions: Some(INSTRUCTIONS.to_string()),
			..Default::default()
		}
	}

	async fn list_tools(
		&self,
		_request: Option<PaginatedRequestParam>,
		_context: RequestContext<RoleServer>,
	) -> Result<ListToolsResult, McpError> {
		Ok(ListToolsResult {
			tools: Self::tools(),
			next_cursor: None,
		})
	}

	async fn call_tool(
		&self,
		request: CallToolRequestParam,
		_context: RequestContext<RoleServer>,
	) -> Result<CallToolResult, McpError> {
		tracing::info!(tool = %request.name, "tool call");
		self.dispatch(&request.name, request.arguments).await
	}
}
