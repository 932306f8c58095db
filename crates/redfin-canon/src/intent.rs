//! Coarse page intent.

use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a page is for. `Unknown` is the fallback for anything unmatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Mortgage,
    Checkout,
    SellerFunnel,
    Listing,
    Search,
    #[default]
    Unknown,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Mortgage => "mortgage",
            Intent::Checkout => "checkout",
            Intent::SellerFunnel => "seller_funnel",
            Intent::Listing => "listing",
            Intent::Search => "search",
            Intent::Unknown => "unknown",
        }
    }

    /// Whether entity extraction applies to this intent.
    pub fn has_entity(self) -> bool {
        matches!(self, Intent::Listing | Intent::SellerFunnel)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a decoded path. Never fails; unmatched paths are `Unknown`.
pub fn classify_intent(path: &str, rules: &RuleSet) -> Intent {
    let path = path.to_lowercase();
    let intent = rules.match_intent(&path).unwrap_or_default();
    tracing::debug!(%path, %intent, "classified intent");
    intent
}
