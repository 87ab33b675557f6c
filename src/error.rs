// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Release registry request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No published release found: {0}")]
    ReleaseNotFound(String),

    #[error("Release registry returned {status}: {body}")]
    Registry { status: u16, body: String },

    #[error("Invalid release version '{tag}': {source}")]
    InvalidVersion {
        tag: String,
        #[source]
        source: semver::Error,
    },

    #[error("Latest release {candidate} is lower than minimum required version {minimum}")]
    VersionRejected { candidate: String, minimum: String },

    #[error("Command `{command}` failed: {reason}")]
    Command { command: String, reason: String },

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    Kubeconfig(String),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Failed to render kustomize overlay: {0}")]
    Overlay(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, InstallError>;
