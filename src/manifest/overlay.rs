// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kustomize overlay used to install releases older than the modern layout threshold

use super::ManifestTarget;
use crate::constants::{overlay, project};
use crate::error::Result;
use crate::version::ReleaseTag;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;

const KUSTOMIZE_API_VERSION: &str = "kustomize.config.k8s.io/v1beta1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    pub api_version: String,
    pub kind: String,
    pub images: Vec<ImageOverride>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOverride {
    pub name: String,
    pub new_tag: String,
}

impl Kustomization {
    /// Pin the kwok image to `tag` and pull the upstream base at the same ref
    pub fn for_release(tag: &ReleaseTag) -> Self {
        Self {
            api_version: KUSTOMIZE_API_VERSION.to_string(),
            kind: "Kustomization".to_string(),
            images: vec![ImageOverride {
                name: overlay::IMAGE.to_string(),
                new_tag: tag.as_str().to_string(),
            }],
            resources: vec![format!(
                "https://github.com/{}/kustomize/kwok?ref={}",
                project::FULL_NAME,
                tag
            )],
        }
    }

    pub fn render(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// A temporary directory holding a single `kustomization.yaml`.
///
/// The directory is removed when the overlay is dropped, whichever way the caller exits.
#[derive(Debug)]
pub struct Overlay {
    dir: TempDir,
}

impl Overlay {
    pub fn create(tag: &ReleaseTag) -> Result<Self> {
        let contents = Kustomization::for_release(tag).render()?;

        let dir = tempfile::Builder::new()
            .prefix(overlay::DIR_PREFIX)
            .tempdir()?;
        let file_path = dir.path().join(overlay::FILE_NAME);
        debug!("Writing kustomize overlay to {}", file_path.display());

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&file_path)?;
        file.write_all(contents.as_bytes())?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn target(&self) -> ManifestTarget {
        ManifestTarget::Kustomization(self.dir.path().to_path_buf())
    }
}
