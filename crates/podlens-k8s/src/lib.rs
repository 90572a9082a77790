// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Read-only K8s pod access for podlens.
//!
//! This crate provides:
//! - A trait-based K8s client abstraction for testability
//! - Production implementation using the kube crate, with in-cluster then
//!   kubeconfig credential resolution
//! - The pod sanitizer applied before pods leave the process

mod client;
mod error;
mod kube_client;
pub mod sanitize;
mod types;

pub use client::K8sClient;
pub use error::K8sError;
pub use kube_client::{KubeClient, KubeConnectOptions};
pub use sanitize::{sanitize_pod, sanitize_pods, REDACTED_ANNOTATIONS};
pub use types::{ManagedFieldsEntry, ObjectMeta, Pod};
