// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Release tags and the version gate deciding how (and whether) a release is installed

use crate::constants::versions::MODERN_LAYOUT_SINCE;
use crate::error::{InstallError, Result};
use crate::manifest::Layout;
use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// A published release tag, kept verbatim (including any leading `v`) alongside its parsed version.
///
/// Equality and ordering follow semantic-version precedence, so `v0.4.0` and `0.4.0` compare equal
/// and `v0.4.0-rc.1` sorts before `v0.4.0`.
#[derive(Debug, Clone)]
pub struct ReleaseTag {
    tag: String,
    version: Version,
}

impl ReleaseTag {
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.strip_prefix('v').unwrap_or(tag);
        let version = Version::parse(trimmed).map_err(|source| InstallError::InvalidVersion {
            tag: tag.to_string(),
            source,
        })?;
        Ok(Self {
            tag: tag.to_string(),
            version,
        })
    }

    /// The tag exactly as published
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl PartialEq for ReleaseTag {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for ReleaseTag {}

impl PartialOrd for ReleaseTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReleaseTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

/// Outcome of gating a candidate release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Install from the release-asset manifests
    Modern,
    /// Install through a generated kustomize overlay
    Legacy,
    /// Older than the minimum supported release, nothing may be installed
    Rejected,
}

impl GateDecision {
    pub fn layout(self) -> Option<Layout> {
        match self {
            GateDecision::Modern => Some(Layout::Modern),
            GateDecision::Legacy => Some(Layout::Legacy),
            GateDecision::Rejected => None,
        }
    }
}

/// Compares candidate releases against the minimum supported version and the layout threshold.
///
/// Both default to the same release, in which case `Legacy` is never returned. They stay separate
/// so that a lower minimum lets older releases through on the legacy layout.
#[derive(Debug, Clone)]
pub struct VersionGate {
    minimum: ReleaseTag,
    modern_since: ReleaseTag,
}

impl VersionGate {
    pub fn new(minimum: ReleaseTag) -> Result<Self> {
        Ok(Self {
            minimum,
            modern_since: ReleaseTag::parse(MODERN_LAYOUT_SINCE)?,
        })
    }

    pub fn with_modern_since(mut self, modern_since: ReleaseTag) -> Self {
        self.modern_since = modern_since;
        self
    }

    pub fn minimum(&self) -> &ReleaseTag {
        &self.minimum
    }

    pub fn check(&self, candidate: &ReleaseTag) -> GateDecision {
        if candidate < &self.minimum {
            GateDecision::Rejected
        } else if candidate >= &self.modern_since {
            GateDecision::Modern
        } else {
            GateDecision::Legacy
        }
    }
}

/// Gate `candidate` against `minimum`, using the built-in layout threshold
pub fn check(candidate: &ReleaseTag, minimum: &ReleaseTag) -> Result<GateDecision> {
    Ok(VersionGate::new(minimum.clone())?.check(candidate))
}
