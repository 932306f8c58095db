//! CLI subcommand implementations for the redfin-canon binary.

pub mod batch_cmd;
pub mod canon_cmd;
pub mod classify_cmd;
pub mod output;
pub mod resolve_cmd;

use crate::resolver::{HttpResolver, ResolverConfig};
use anyhow::{Context, Result};
use clap::Args;
use redfin_canon::{MatchMode, RuleSet};
use std::path::Path;
use std::time::Duration;

/// Network options shared by the resolving commands.
#[derive(Debug, Clone, Args)]
pub struct NetArgs {
    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,
    /// Maximum redirects to follow per URL.
    #[arg(long, default_value_t = 10)]
    pub max_redirects: usize,
}

impl NetArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn resolver(&self) -> Result<HttpResolver> {
        HttpResolver::new(&ResolverConfig {
            max_redirects: self.max_redirects,
            ..ResolverConfig::default()
        })
        .context("failed to build HTTP client")
    }
}

/// Load the active rule set: a JSON rules file if given, else the built-in
/// rules, with an optional match-mode override.
pub fn load_rules(path: Option<&Path>, mode: Option<MatchMode>) -> Result<RuleSet> {
    let rules = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read rules file: {}", path.display()))?;
            RuleSet::from_json(&json)
                .with_context(|| format!("invalid rules file: {}", path.display()))?
        }
        None => RuleSet::builtin().clone(),
    };
    Ok(match mode {
        Some(mode) => rules.with_match_mode(mode),
        None => rules,
    })
}
