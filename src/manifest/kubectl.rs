// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The external manifest tool boundary

use super::{Action, ManifestTarget};
use crate::error::{InstallError, Result};
use std::process::{Command, Stdio};
use tracing::info;

/// Something that applies or deletes manifests against the cluster and returns its captured stdout
pub trait ManifestTool {
    fn run(&self, action: Action, target: &ManifestTarget, extra_args: &[&str]) -> Result<Vec<u8>>;
}

/// Runs a `kubectl`-compatible binary. Stdout is captured, stderr goes straight to our own stderr.
#[derive(Debug, Clone)]
pub struct Kubectl {
    binary: String,
}

impl Kubectl {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for Kubectl {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

/// `<action> -f|-k <target> [extra...]`
pub fn command_args(action: Action, target: &ManifestTarget, extra_args: &[&str]) -> Vec<String> {
    let mut args = vec![
        action.as_str().to_string(),
        target.flag().to_string(),
        target.location(),
    ];
    args.extend(extra_args.iter().map(|a| a.to_string()));
    args
}

impl ManifestTool for Kubectl {
    fn run(&self, action: Action, target: &ManifestTarget, extra_args: &[&str]) -> Result<Vec<u8>> {
        let args = command_args(action, target, extra_args);
        let command = format!("{} {}", self.binary, args.join(" "));
        info!("{}", command);

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| InstallError::Command {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(InstallError::Command {
                command,
                reason: format!("exited with {}", output.status),
            });
        }

        Ok(output.stdout)
    }
}
