//! Records produced by the redirect-resolution pipeline.
//!
//! Following redirects needs the network and lives outside this crate. The
//! resolver hands back a [`Resolution`]; everything else in a
//! [`ResolutionRecord`] is computed here from the original URL.

use crate::canonical::{CanonicalRecord, Canonicalizer};
use crate::classify::{classify_page, PageClass};
use crate::decompose::{decompose, DecomposedUrl};
use crate::normalize::normalize_url;
use crate::site::is_site_domain;
use serde::{Deserialize, Serialize};

/// Outcome of following redirects from one URL.
///
/// A transport failure sets `error` and leaves `final_url`/`status_code`
/// empty; `redirect_chain` still lists the hops completed before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub final_url: Option<String>,
    pub status_code: Option<u16>,
    /// Each URL that answered with a redirect, in order.
    #[serde(default)]
    pub redirect_chain: Vec<String>,
    pub error: Option<String>,
}

impl Resolution {
    pub fn success(
        final_url: impl Into<String>,
        status_code: u16,
        redirect_chain: Vec<String>,
    ) -> Self {
        Self {
            final_url: Some(final_url.into()),
            status_code: Some(status_code),
            redirect_chain,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>, redirect_chain: Vec<String>) -> Self {
        Self {
            final_url: None,
            status_code: None,
            redirect_chain,
            error: Some(error.into()),
        }
    }
}

/// A URL decomposed and normalized, ready to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUrl {
    pub original: String,
    pub decomposed: DecomposedUrl,
    /// The URL the resolver should request.
    pub normalized: String,
}

impl PreparedUrl {
    pub fn new(raw: &str) -> Self {
        let decomposed = decompose(raw);
        let normalized = normalize_url(&decomposed);
        Self {
            original: raw.to_string(),
            decomposed,
            normalized,
        }
    }
}

/// Full report for one input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub original_url: String,
    pub normalized_url: String,
    /// Decoded path of the original URL.
    pub decoded_url: String,
    pub redirect_chain: Vec<String>,
    pub final_url: Option<String>,
    pub status_code: Option<u16>,
    /// Authority of the final URL.
    pub domain: Option<String>,
    pub is_internal: bool,
    /// Page label of the original path.
    pub classification: PageClass,
    pub canonical: Option<CanonicalRecord>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ResolutionRecord {
    /// Combine a prepared URL with its resolution.
    ///
    /// Never fails: a transport error and a canonicalization error are both
    /// recorded in `errors`.
    pub fn assemble(
        prepared: PreparedUrl,
        resolution: Resolution,
        canon: &Canonicalizer<'_>,
    ) -> Self {
        let mut errors = Vec::new();
        if let Some(error) = resolution.error {
            errors.push(format!("resolve: {error}"));
        }

        let canonical = match canon.canonicalize(&prepared.original) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(url = %prepared.original, error = %e, "canonicalization failed");
                errors.push(format!("canonicalize: {e}"));
                None
            }
        };

        let domain = resolution
            .final_url
            .as_deref()
            .map(|url| decompose(url).authority);
        let is_internal = resolution
            .final_url
            .as_deref()
            .is_some_and(is_site_domain);

        Self {
            classification: classify_page(&prepared.decomposed.path),
            decoded_url: prepared.decomposed.path,
            original_url: prepared.original,
            normalized_url: prepared.normalized,
            redirect_chain: resolution.redirect_chain,
            final_url: resolution.final_url,
            status_code: resolution.status_code,
            domain,
            is_internal,
            canonical,
            errors,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
