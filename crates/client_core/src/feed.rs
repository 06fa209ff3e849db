//! Feed client: one GET per call, no retry, no timeout.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{protocol::FeedDocument, FetchFailure, Snapshot};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";

/// Source of earthquake snapshots. Failures come back as values; implementations log
/// the detail themselves.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchFailure>;
}

pub struct HttpFeedClient {
    http: Client,
    url: Url,
}

impl HttpFeedClient {
    pub fn new(feed_url: &str) -> Result<Self> {
        let url = Url::parse(feed_url).with_context(|| format!("invalid feed url '{feed_url}'"))?;
        Ok(Self {
            http: Client::new(),
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch_document(&self) -> Result<FeedDocument, FetchFailure> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(FetchFailure::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FetchFailure::transport)?;
        Ok(serde_json::from_slice::<FeedDocument>(&body)?)
    }
}

#[async_trait]
impl FeedSource for HttpFeedClient {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchFailure> {
        match self.fetch_document().await {
            Ok(document) => {
                let snapshot = Snapshot::from(document);
                debug!(url = %self.url, records = snapshot.len(), "fetched earthquake feed");
                Ok(snapshot)
            }
            Err(err) => {
                warn!(url = %self.url, error = %err, "earthquake feed fetch failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/feed_tests.rs"]
mod tests;
