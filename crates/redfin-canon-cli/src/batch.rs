//! Batch resolution of URL lists.
//!
//! Every input URL yields exactly one [`ResolutionRecord`], in input order,
//! whether or not resolving or canonicalizing it succeeded.

use crate::resolver::RedirectResolver;
use crate::throttle::Throttle;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use redfin_canon::{Canonicalizer, PreparedUrl, ResolutionRecord};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Extract URLs from newline-delimited text. Blank lines and lines starting
/// with `#` are skipped; surrounding whitespace is trimmed.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Read a URL list file.
pub fn load_urls(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list: {}", path.display()))?;
    Ok(parse_url_list(&text))
}

/// Resolves and reports URLs with bounded concurrency.
pub struct BatchRunner<'r> {
    resolver: Arc<dyn RedirectResolver>,
    canon: Canonicalizer<'r>,
    throttle: Throttle,
    timeout: Duration,
    concurrency: usize,
}

impl<'r> BatchRunner<'r> {
    pub fn new(
        resolver: Arc<dyn RedirectResolver>,
        canon: Canonicalizer<'r>,
        throttle: Throttle,
        timeout: Duration,
        concurrency: usize,
    ) -> Self {
        Self {
            resolver,
            canon,
            throttle,
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve one URL and assemble its record.
    pub async fn run_one(&self, url: &str) -> ResolutionRecord {
        let prepared = PreparedUrl::new(url);
        let resolution = {
            let _permit = self.throttle.acquire().await;
            self.resolver.resolve(&prepared.normalized, self.timeout).await
        };
        ResolutionRecord::assemble(prepared, resolution, &self.canon)
    }

    /// Resolve every URL. Output order matches input order.
    pub async fn run(&self, urls: &[String]) -> Vec<ResolutionRecord> {
        let records: Vec<ResolutionRecord> = stream::iter(urls)
            .map(|url| self.run_one(url))
            .buffered(self.concurrency)
            .collect()
            .await;

        let failed = records.iter().filter(|r| !r.is_ok()).count();
        info!(total = records.len(), failed, "batch complete");
        records
    }
}
