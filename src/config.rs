// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use url::Url;

use crate::constants::versions::MIN_VERSION;
use crate::version::ReleaseTag;

const DEFAULT_NAMESPACE: &str = "default";
const DEFAULT_SERVICE_ACCOUNT: &str = "cluster-autoscaler";
const DEFAULT_KUBECTL: &str = "kubectl";
const DEFAULT_REGISTRY_URL: &str = "https://api.github.com";

/// Installer configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace of the service account granted cluster-admin (`POD_NAMESPACE`)
    pub namespace: String,
    /// Service account granted cluster-admin while kwok is installed (`SERVICE_ACCOUNT`)
    pub service_account: String,
    /// Manifest tool binary (`KUBECTL`)
    pub kubectl: String,
    /// Base URL of the GitHub-compatible release API (`RELEASE_REGISTRY_URL`)
    pub registry_url: Url,
    /// Oldest kwok release accepted (`KWOK_MIN_VERSION`)
    pub min_version: ReleaseTag,
    /// Remove leftovers of a previous run before installing (`CLEAN_SLATE`)
    pub clean_slate: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let registry_url = var("RELEASE_REGISTRY_URL", DEFAULT_REGISTRY_URL);
        let registry_url = Url::parse(&registry_url)
            .with_context(|| format!("RELEASE_REGISTRY_URL '{}' is not a valid URL", registry_url))?;

        let min_version = var("KWOK_MIN_VERSION", MIN_VERSION);
        let min_version = ReleaseTag::parse(&min_version)
            .with_context(|| format!("KWOK_MIN_VERSION '{}' is not a semantic version", min_version))?;

        let clean_slate = var("CLEAN_SLATE", "false");
        let clean_slate: bool = clean_slate
            .parse()
            .with_context(|| format!("CLEAN_SLATE must be 'true' or 'false', got '{}'", clean_slate))?;

        Ok(Config {
            namespace: var("POD_NAMESPACE", DEFAULT_NAMESPACE),
            service_account: var("SERVICE_ACCOUNT", DEFAULT_SERVICE_ACCOUNT),
            kubectl: var("KUBECTL", DEFAULT_KUBECTL),
            registry_url,
            min_version,
            clean_slate,
        })
    }
}
