// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! podlens server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use podlens_k8s::{K8sClient, KubeClient, KubeConnectOptions};
use podlens_server::{create_router, AppState, Metrics, PodToolServer, ServerConfig};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// podlens - MCP server for read-only Kubernetes pod queries.
#[derive(Parser, Debug)]
#[command(
	name = "podlens-server",
	about = "MCP server for read-only Kubernetes pod queries",
	version
)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/podlens/server.toml)
	#[arg(long, env = "PODLENS_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(path) => podlens_server_config::load_config_with_file(path)?,
		None => podlens_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	log_startup(&config);

	let metrics = Arc::new(Metrics::new()?);

	let client: Arc<dyn K8sClient> = Arc::new(
		KubeClient::connect(&KubeConnectOptions {
			in_cluster: config.kube.in_cluster,
			kubeconfig: config.kube.kubeconfig.clone(),
		})
		.await?,
	);

	let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
	let bind = listener.local_addr()?;

	let ct = CancellationToken::new();
	let (sse_server, mcp_routes) = SseServer::new(SseServerConfig {
		bind,
		sse_path: config.mcp.sse_path.clone(),
		post_path: config.mcp.message_path.clone(),
		ct: ct.clone(),
		sse_keep_alive: config.mcp.sse_keep_alive,
	});
	let _service_ct = sse_server.with_service(move || PodToolServer::new(Arc::clone(&client)));

	let app = create_router(AppState { metrics }, &config.mcp, mcp_routes);

	tracing::info!(
		addr = %bind,
		sse = %config.mcp.sse_path,
		message = %config.mcp.message_path,
		metrics = "/metrics",
		root = "/",
		"listening"
	);

	let result = tokio::select! {
		result = axum::serve(listener, app) => result,
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
			Ok(())
		}
	};
	ct.cancel();

	if let Err(e) = result {
		tracing::error!(error = %e, "Server error");
		return Err(e.into());
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}

/// Log the resolved configuration. Must run after the subscriber is installed.
fn log_startup(config: &ServerConfig) {
	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		in_cluster = config.kube.in_cluster,
		kubeconfig = ?config.kube.kubeconfig,
		sse_path = %config.mcp.sse_path,
		message_path = %config.mcp.message_path,
		sse_keep_alive = ?config.mcp.sse_keep_alive,
		"starting podlens-server"
	);
}
