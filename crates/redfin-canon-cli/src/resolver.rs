//! Redirect resolution over HTTP.
//!
//! Redirects are followed by hand rather than by the client so that every
//! hop is recorded, including the hops completed before a failure.

use async_trait::async_trait;
use redfin_canon::Resolution;
use reqwest::header::LOCATION;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Follows redirects from a URL to its final destination.
///
/// Implementations never fail: problems are reported through
/// [`Resolution::error`].
#[async_trait]
pub trait RedirectResolver: Send + Sync {
    async fn resolve(&self, url: &str, timeout: Duration) -> Resolution;
}

/// Errors that can occur while following redirects.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid redirect location from {0}")]
    InvalidLocation(String),
    #[error("too many redirects (limit {0})")]
    TooManyRedirects(usize),
}

/// Configuration for the HTTP resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Maximum redirects followed before giving up.
    pub max_redirects: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("redfin-canon/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(10),
            max_redirects: 10,
        }
    }
}

/// [`RedirectResolver`] backed by `reqwest`. Issues only GET requests.
pub struct HttpResolver {
    client: reqwest::Client,
    max_redirects: usize,
}

impl HttpResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            max_redirects: config.max_redirects,
        })
    }

    /// Follow redirects from `url`, pushing every redirecting URL onto
    /// `chain`. Returns the final URL and its status.
    async fn follow(
        &self,
        url: &str,
        timeout: Duration,
        chain: &mut Vec<String>,
    ) -> Result<(String, u16), ResolveError> {
        let mut current = Url::parse(url).map_err(|e| ResolveError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        loop {
            let response = self
                .client
                .get(current.clone())
                .timeout(timeout)
                .send()
                .await?;
            let status = response.status();

            if !status.is_redirection() {
                return Ok((current.to_string(), status.as_u16()));
            }
            // A 3xx without a Location (e.g. 304) ends the chain where it is.
            let Some(location) = response.headers().get(LOCATION) else {
                return Ok((current.to_string(), status.as_u16()));
            };

            let next = location
                .to_str()
                .ok()
                .and_then(|loc| current.join(loc).ok())
                .ok_or_else(|| ResolveError::InvalidLocation(current.to_string()))?;

            debug!(from = %current, to = %next, status = status.as_u16(), "following redirect");
            chain.push(current.to_string());
            if chain.len() > self.max_redirects {
                return Err(ResolveError::TooManyRedirects(self.max_redirects));
            }
            current = next;
        }
    }
}

#[async_trait]
impl RedirectResolver for HttpResolver {
    async fn resolve(&self, url: &str, timeout: Duration) -> Resolution {
        let mut chain = Vec::new();
        match self.follow(url, timeout, &mut chain).await {
            Ok((final_url, status)) => Resolution::success(final_url, status, chain),
            Err(e) => {
                warn!(%url, error = %e, hops = chain.len(), "redirect resolution failed");
                Resolution::failure(e.to_string(), chain)
            }
        }
    }
}
