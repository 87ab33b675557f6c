// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and the temporary cluster-admin binding.

pub mod client;
pub mod rbac;

pub use client::connect;
pub use rbac::{AccessBinder, ServiceIdentity};
