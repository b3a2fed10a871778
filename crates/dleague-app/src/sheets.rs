// Published Google Sheet tab downloads.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use tracing::{debug, warn};

use dleague_core::config::SheetSettings;

/// Anything that can return the CSV text of a published sheet tab.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_csv(&self, url: &str) -> anyhow::Result<String>;
}

pub struct HttpSheetSource {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpSheetSource {
    pub fn new(settings: &SheetSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout: Duration::from_millis(settings.timeout_ms),
        }
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch_csv(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("sheet returned HTTP {status} for {url}");
        }
        let text = response
            .text()
            .await
            .with_context(|| format!("reading body of {url}"))?;
        debug!(url, bytes = text.len(), "fetched sheet tab");
        Ok(text)
    }
}

/// Fetch one tab, logging and discarding any failure.
pub async fn fetch_tab(source: &dyn SheetSource, url: &str) -> Option<String> {
    match source.fetch_csv(url).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(url, error = %format!("{e:#}"), "sheet fetch failed; using fallback data");
            None
        }
    }
}
