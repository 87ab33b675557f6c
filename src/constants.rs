// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Coordinates of the kwok project on GitHub
pub mod project {
    pub const OWNER: &str = "kubernetes-sigs";
    pub const REPO: &str = "kwok";
    /// `owner/repo`, as used in download and kustomize URLs
    pub const FULL_NAME: &str = "kubernetes-sigs/kwok";
}

/// Version thresholds
pub mod versions {
    /// Oldest kwok release this installer accepts by default
    pub const MIN_VERSION: &str = "v0.4.0";
    /// Releases at or above this use the release-asset manifests, older ones the kustomize overlay
    pub const MODERN_LAYOUT_SINCE: &str = "v0.4.0";
}

/// Release assets used by the modern layout
pub mod manifests {
    pub const DOWNLOAD_HOST: &str = "https://github.com";
    /// Deployment and CRDs
    pub const DEPLOYMENT: &str = "kwok.yaml";
    /// Default stage configuration, layered on top of the deployment
    pub const STAGE_FAST: &str = "stage-fast.yaml";
}

/// Legacy kustomize overlay
pub mod overlay {
    pub const IMAGE: &str = "registry.k8s.io/kwok/kwok";
    pub const FILE_NAME: &str = "kustomization.yaml";
    pub const DIR_PREFIX: &str = "install-kwok";
}

/// Temporary cluster-admin grant
pub mod rbac {
    pub const BINDING_NAME: &str = "kwok-provider";
    pub const CLUSTER_ROLE: &str = "cluster-admin";
    pub const API_GROUP: &str = "rbac.authorization.k8s.io";
}

/// Pause between install and uninstall, in seconds
pub const SETTLE_SECS: u64 = 20;

/// User agent sent to the release registry
pub const USER_AGENT: &str = "install-kwok";
