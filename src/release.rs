// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Latest-release lookup against the GitHub releases API

use crate::constants::{project, USER_AGENT};
use crate::error::{InstallError, Result};
use crate::version::ReleaseTag;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Resolves the newest published kwok release. Every lookup hits the registry; nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct ReleaseResolver {
    client: reqwest::Client,
    base_url: Url,
    owner: String,
    repo: String,
}

impl ReleaseResolver {
    pub fn new(base_url: Url) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            owner: project::OWNER.to_string(),
            repo: project::REPO.to_string(),
        })
    }

    fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url.as_str().trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// Fetch the tag of the latest release, exactly as published
    #[instrument(skip(self), fields(repo = %format!("{}/{}", self.owner, self.repo)))]
    pub async fn latest_release(&self) -> Result<ReleaseTag> {
        let url = self.latest_release_url();
        debug!("Querying {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(InstallError::ReleaseNotFound(format!(
                "{}/{} has no published release",
                self.owner, self.repo
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InstallError::Registry {
                status: status.as_u16(),
                body,
            });
        }

        let release: LatestRelease = response.json().await?;
        let tag = ReleaseTag::parse(&release.tag_name)?;
        info!("Latest kwok release is {}", tag);
        Ok(tag)
    }
}
