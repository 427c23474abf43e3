use crate::prelude::*;
use palmblog_core::issue::{parse_issue, parse_issue_list, RawIssue};
use reqwest::StatusCode;

use super::{create_client, BlogConfig};

/// Outcome of reading a single issue
#[derive(Debug, Clone, PartialEq)]
pub enum IssueLookup {
    Found(RawIssue),
    NotFound,
}

/// Reads blog issues from the configured repository
#[derive(Debug, Clone)]
pub struct IssueFetcher {
    client: reqwest::Client,
    config: BlogConfig,
}

impl IssueFetcher {
    pub fn new(config: BlogConfig) -> Result<Self, Error> {
        Ok(Self {
            client: create_client(&config)?,
            config,
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, Error> {
        log::debug!(
            "GET {url} ({})",
            if self.config.token.is_some() {
                "authenticated"
            } else {
                "anonymous"
            }
        );

        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }

    /// Fetch all open issues, newest first
    pub async fn fetch_issues(&self) -> Result<Vec<RawIssue>, Error> {
        let url = self.config.repository.list_issues_url();
        let response = self.get(&url).await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("Listing issues failed with {status}");
            return Err(Error::Status(status.as_u16()));
        }

        let payload = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let batch = parse_issue_list(&payload).map_err(|e| Error::Decode(e.to_string()))?;

        for rejected in &batch.rejected {
            log::warn!(
                "Skipping issue at position {}: {}",
                rejected.index,
                rejected.reason
            );
        }

        Ok(batch.issues)
    }

    /// Fetch a single issue by number
    ///
    /// The number is passed through as-is, encoded as one path segment.
    pub async fn fetch_issue(&self, number: &str) -> Result<IssueLookup, Error> {
        let url = self
            .config
            .repository
            .issue_url(&urlencoding::encode(number));
        let response = self.get(&url).await?;

        match response.status() {
            code if code.is_success() => {
                let payload = response
                    .text()
                    .await
                    .map_err(|e| Error::Network(e.to_string()))?;
                parse_issue(&payload)
                    .map(IssueLookup::Found)
                    .map_err(|e| Error::Decode(e.to_string()))
            }

            StatusCode::NOT_FOUND => {
                log::debug!("Issue {number} not found");
                Ok(IssueLookup::NotFound)
            }

            code => Err(Error::Status(code.as_u16())),
        }
    }
}
