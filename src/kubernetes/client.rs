// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation

use crate::error::{InstallError, Result};
use kube::{Client, Config as KConfig};
use tracing::{debug, info};

/// Create a client from the ambient kubeconfig (`KUBECONFIG` or `~/.kube/config`) or the in-cluster config
pub async fn connect() -> Result<Client> {
    let config = KConfig::infer()
        .await
        .map_err(|e| InstallError::Kubeconfig(format!("Failed to infer config: {}", e)))?;
    debug!("Using cluster {}", config.cluster_url);

    let client = Client::try_from(config)
        .map_err(|e| InstallError::Kubeconfig(format!("Failed to create client: {}", e)))?;
    info!("Connected to Kubernetes cluster");
    Ok(client)
}
