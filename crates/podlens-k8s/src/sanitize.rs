// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Redaction applied to pods before they are serialized for callers.
//!
//! Managed fields are dropped unconditionally. The annotations in
//! [`REDACTED_ANNOTATIONS`] are removed when present; every other annotation
//! is left as-is. Sanitizing never fails and is idempotent.

use crate::types::Pod;

/// Annotation keys stripped from every pod.
pub const REDACTED_ANNOTATIONS: &[&str] = &[
	"kubectl.kubernetes.io/last-applied-configuration",
	"kubernetes.io/psp",
];

/// Strip noisy and sensitive metadata from a pod in place.
pub fn sanitize_pod(pod: &mut Pod) {
	let metadata = &mut pod.metadata;
	metadata.managed_fields = None;

	if let Some(annotations) = metadata.annotations.as_mut() {
		for key in REDACTED_ANNOTATIONS {
			annotations.remove(*key);
		}
	}
}

/// Sanitize every pod of a list, preserving order.
pub fn sanitize_pods(pods: &mut [Pod]) {
	pods.iter_mut().for_each(sanitize_pod);
}
