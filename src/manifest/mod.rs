// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Installing and removing the kwok manifests through an external manifest tool.

pub mod kubectl;
pub mod overlay;

pub use kubectl::{Kubectl, ManifestTool};
pub use overlay::{Kustomization, Overlay};

use crate::constants::{manifests, project};
use crate::error::Result;
use crate::version::ReleaseTag;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Passed on every delete so that already-removed resources are not an error
pub const IGNORE_NOT_FOUND: &str = "--ignore-not-found=true";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Apply,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Apply => "apply",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a release's manifests are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Deployment/CRD and stage manifests published as release assets
    Modern,
    /// Upstream kustomize base, pinned through a generated overlay
    Legacy,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Modern => f.write_str("modern"),
            Layout::Legacy => f.write_str("legacy"),
        }
    }
}

/// What the manifest tool is pointed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestTarget {
    /// `-f <url>`
    Url(String),
    /// `-k <dir>`
    Kustomization(PathBuf),
}

impl ManifestTarget {
    pub fn flag(&self) -> &'static str {
        match self {
            ManifestTarget::Url(_) => "-f",
            ManifestTarget::Kustomization(_) => "-k",
        }
    }

    pub fn location(&self) -> String {
        match self {
            ManifestTarget::Url(url) => url.clone(),
            ManifestTarget::Kustomization(dir) => dir.display().to_string(),
        }
    }
}

fn release_asset_url(tag: &ReleaseTag, file_name: &str) -> String {
    format!(
        "{}/{}/releases/download/{}/{}",
        manifests::DOWNLOAD_HOST,
        project::FULL_NAME,
        tag,
        file_name
    )
}

/// Modern-layout manifests in creation order: deployment and CRDs, then the stage configuration
pub fn modern_manifest_urls(tag: &ReleaseTag) -> [String; 2] {
    [
        release_asset_url(tag, manifests::DEPLOYMENT),
        release_asset_url(tag, manifests::STAGE_FAST),
    ]
}

/// Installs and uninstalls a kwok release with whichever layout it needs
#[derive(Debug, Clone)]
pub struct ManifestApplier<T> {
    tool: T,
}

impl<T: ManifestTool> ManifestApplier<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Apply the release's manifests, returning the tool's combined output
    #[instrument(skip(self, tag), fields(tag = %tag))]
    pub fn apply(&self, tag: &ReleaseTag, layout: Layout) -> Result<Vec<u8>> {
        self.execute(Action::Apply, tag, layout)
    }

    /// Delete the release's manifests in reverse creation order, ignoring anything already gone
    #[instrument(skip(self, tag), fields(tag = %tag))]
    pub fn unapply(&self, tag: &ReleaseTag, layout: Layout) -> Result<Vec<u8>> {
        self.execute(Action::Delete, tag, layout)
    }

    fn execute(&self, action: Action, tag: &ReleaseTag, layout: Layout) -> Result<Vec<u8>> {
        match layout {
            Layout::Modern => {
                let mut urls = modern_manifest_urls(tag);
                if action == Action::Delete {
                    urls.reverse();
                }
                let mut output = Vec::new();
                for url in urls {
                    output.extend(self.invoke(action, &ManifestTarget::Url(url))?);
                }
                Ok(output)
            }
            Layout::Legacy => {
                let overlay = Overlay::create(tag)?;
                self.invoke(action, &overlay.target())
            }
        }
    }

    fn invoke(&self, action: Action, target: &ManifestTarget) -> Result<Vec<u8>> {
        let extra_args: &[&str] = match action {
            Action::Apply => &[],
            Action::Delete => &[IGNORE_NOT_FOUND],
        };
        let output = self.tool.run(action, target, extra_args)?;
        info!("kubectl output: \n{}", String::from_utf8_lossy(&output));
        Ok(output)
    }
}
