//! Rule tables driving intent detection and query cleanup.
//!
//! Rules are ordered lists, never maps: the first matching entry wins, so
//! the order written here is the precedence. The built-in set is created
//! once per process and never mutated. Alternative sets (loaded from JSON,
//! or switched to the older prefix matching) are passed explicitly to
//! [`crate::Canonicalizer`].

use crate::intent::Intent;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// How intent patterns are compared against a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Pattern may occur anywhere in the path (`/x/mortgage-rates/y` is mortgage).
    #[default]
    Substring,
    /// Pattern must start the path. Earlier rule sets behaved this way.
    Prefix,
}

impl MatchMode {
    /// Test a bare intent pattern against `path` under this mode.
    pub fn matches(self, pattern: &str, path: &str) -> bool {
        match self {
            MatchMode::Substring => path.contains(pattern),
            MatchMode::Prefix => path.starts_with(pattern),
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "substring" | "contains" => Ok(MatchMode::Substring),
            "prefix" => Ok(MatchMode::Prefix),
            other => Err(format!("unknown match mode `{other}` (expected substring or prefix)")),
        }
    }
}

/// A single path test used by the page classifier rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Exactly `/`. An empty path is not the root.
    Root,
    Exact(String),
    Prefix(String),
    Contains(String),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Root => path == "/",
            PathPattern::Exact(p) => path == p,
            PathPattern::Prefix(p) => path.starts_with(p.as_str()),
            PathPattern::Contains(p) => path.contains(p.as_str()),
        }
    }
}

/// One row of the intent table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    pub intent: Intent,
    pub patterns: Vec<String>,
}

impl IntentRule {
    fn new(intent: Intent, patterns: &[&str]) -> Self {
        Self {
            intent,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// The active rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Ordered intent table; the first rule with any matching pattern wins.
    pub intents: Vec<IntentRule>,
    /// Tracking parameters removed before query-driven extraction.
    #[serde(default = "default_ignored_params")]
    pub ignored_params: Vec<String>,
}

static BUILTIN: LazyLock<RuleSet> = LazyLock::new(RuleSet::default);

fn default_ignored_params() -> Vec<String> {
    [
        "utm_source",
        "utm_medium",
        "utm_campaign",
        "io",
        "spex_v",
        "context",
        "epc",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Substring,
            intents: vec![
                IntentRule::new(
                    Intent::Mortgage,
                    &["/mortgage", "/mortgage-get-pre-approved", "/mortgage-rates"],
                ),
                IntentRule::new(Intent::Checkout, &["/tours/checkout", "/tours/schedule"]),
                IntentRule::new(
                    Intent::SellerFunnel,
                    &["/sell-a-home", "/seller-consultation"],
                ),
                IntentRule::new(Intent::Listing, &["/home/"]),
                IntentRule::new(Intent::Search, &["/city/", "/houses-near-me", "/filter/"]),
            ],
            ignored_params: default_ignored_params(),
        }
    }
}

impl RuleSet {
    /// The process-wide built-in rules.
    pub fn builtin() -> &'static RuleSet {
        &*BUILTIN
    }

    /// Parse a rule set from JSON. Omitted `match_mode` and
    /// `ignored_params` fall back to the built-in values.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Same rules, different match mode.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn is_ignored_param(&self, key: &str) -> bool {
        self.ignored_params.iter().any(|p| p == key)
    }

    /// First intent whose patterns match `path`, if any.
    pub fn match_intent(&self, path: &str) -> Option<Intent> {
        self.intents
            .iter()
            .find(|rule| {
                rule.patterns
                    .iter()
                    .any(|p| self.match_mode.matches(p, path))
            })
            .map(|rule| rule.intent)
    }
}
