//! Mission news ticker client.
//!
//! Fetches an ordered list of short news records from an external
//! collaborator. Failures degrade to an empty list (the ticker simply has
//! nothing to show) and never throw into the core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One news record, newest ordering decided by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub timestamp: String,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("news request failed: {0}")]
    Transport(#[from] ureq::Error),
}

/// Client for the news collaborator.
///
/// Constructed without an endpoint, the client is disabled and always
/// yields the empty list.
#[derive(Debug, Clone)]
pub struct NewsClient {
    endpoint: Option<String>,
}

impl NewsClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
        }
    }

    /// A client with no collaborator configured.
    pub fn disabled() -> Self {
        Self { endpoint: None }
    }

    /// Fetch the current news list. Blocking; async callers go through
    /// [`fetch_or_empty`](Self::fetch_or_empty).
    pub fn fetch(&self) -> Result<Vec<NewsItem>, NewsError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(Vec::new());
        };

        let items: Vec<NewsItem> = ureq::get(endpoint).call()?.body_mut().read_json()?;
        Ok(items)
    }

    /// Fetch the news list, degrading to empty on any failure.
    pub async fn fetch_or_empty(&self) -> Vec<NewsItem> {
        let client = self.clone();
        let result = tokio::task::spawn_blocking(move || client.fetch()).await;

        match result {
            Ok(Ok(items)) => items,
            Ok(Err(err)) => {
                tracing::warn!("news fetch failed: {err}");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!("news task failed: {err}");
                Vec::new()
            }
        }
    }
}
