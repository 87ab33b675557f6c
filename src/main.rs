// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use install_kwok::config::Config;
use install_kwok::kubernetes::{connect, AccessBinder, ServiceIdentity};
use install_kwok::manifest::{Kubectl, ManifestApplier};
use install_kwok::orchestrator::Orchestrator;
use install_kwok::release::ReleaseResolver;
use install_kwok::version::VersionGate;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: service_account={}/{}, min_version={}",
        config.namespace, config.service_account, config.min_version
    );

    let client = connect().await?;

    let resolver = ReleaseResolver::new(config.registry_url.clone())
        .context("Failed to create release registry client")?;
    let gate = VersionGate::new(config.min_version.clone())?;
    let binder = AccessBinder::new(client, ServiceIdentity::from(&config));
    let applier = ManifestApplier::new(Kubectl::new(config.kubectl.clone()));

    let release = Orchestrator::new(resolver, gate, binder, applier)
        .with_clean_slate(config.clean_slate)
        .run()
        .await?;

    info!("kwok {} installed and removed", release);
    Ok(())
}
