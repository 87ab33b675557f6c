// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolve, gate, bind, install, wait, uninstall, unbind.

use crate::constants::SETTLE_SECS;
use crate::error::{InstallError, Result};
use crate::kubernetes::AccessBinder;
use crate::manifest::{Layout, ManifestApplier, ManifestTool};
use crate::release::ReleaseResolver;
use crate::version::{ReleaseTag, VersionGate};
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Where a run currently is. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Resolving,
    Gating,
    Binding,
    Installing,
    Waiting,
    Uninstalling,
    Unbinding,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub struct Orchestrator<T> {
    resolver: ReleaseResolver,
    gate: VersionGate,
    binder: AccessBinder,
    applier: ManifestApplier<T>,
    settle: Duration,
    clean_slate: bool,
    phase: Phase,
}

impl<T: ManifestTool> Orchestrator<T> {
    pub fn new(
        resolver: ReleaseResolver,
        gate: VersionGate,
        binder: AccessBinder,
        applier: ManifestApplier<T>,
    ) -> Self {
        Self {
            resolver,
            gate,
            binder,
            applier,
            settle: Duration::from_secs(SETTLE_SECS),
            clean_slate: false,
            phase: Phase::Init,
        }
    }

    /// Override the pause between install and uninstall
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Remove leftovers of an earlier run before installing
    pub fn with_clean_slate(mut self, clean_slate: bool) -> Self {
        self.clean_slate = clean_slate;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        info!("{} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Run one full cycle, returning the release that was installed and removed
    pub async fn run(&mut self) -> Result<ReleaseTag> {
        match self.cycle().await {
            Ok(tag) => {
                self.enter(Phase::Done);
                Ok(tag)
            }
            Err(e) => {
                error!("{} failed: {}", self.phase, e);
                self.phase = Phase::Failed;
                Err(e)
            }
        }
    }

    async fn cycle(&mut self) -> Result<ReleaseTag> {
        self.enter(Phase::Resolving);
        let tag = self.resolver.latest_release().await?;

        self.enter(Phase::Gating);
        let Some(layout) = self.gate.check(&tag).layout() else {
            return Err(InstallError::VersionRejected {
                candidate: tag.to_string(),
                minimum: self.gate.minimum().to_string(),
            });
        };
        info!("Installing kwok {} using the {} layout", tag, layout);

        if self.clean_slate {
            self.clear_previous(&tag, layout).await;
        }

        self.enter(Phase::Binding);
        self.binder.bind().await?;

        // The binding must not outlive the run, so unbind whatever the bracketed work returned.
        let work = self.install_and_uninstall(&tag, layout).await;

        self.enter(Phase::Unbinding);
        let unbind = self.binder.unbind().await;

        match (work, unbind) {
            (Ok(()), Ok(())) => Ok(tag),
            (Ok(()), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(unbind_err)) => {
                warn!("Failed to remove access binding after error: {}", unbind_err);
                Err(e)
            }
        }
    }

    async fn install_and_uninstall(&mut self, tag: &ReleaseTag, layout: Layout) -> Result<()> {
        self.enter(Phase::Installing);
        self.applier.apply(tag, layout)?;

        self.enter(Phase::Waiting);
        sleep(self.settle).await;

        self.enter(Phase::Uninstalling);
        self.applier.unapply(tag, layout)?;
        Ok(())
    }

    /// Best effort: a fresh cluster has nothing to remove, and may not even know kwok's CRDs.
    async fn clear_previous(&self, tag: &ReleaseTag, layout: Layout) {
        info!("Clearing leftovers of a previous run");
        if let Err(e) = self.binder.unbind().await {
            warn!("Failed deleting existing access binding: {}", e);
        }
        if let Err(e) = self.applier.unapply(tag, layout) {
            warn!("Failed uninstalling previous kwok: {}", e);
        }
    }
}
