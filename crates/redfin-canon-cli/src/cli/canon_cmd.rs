//! `redfin-canon canon <url>...`: print canonical records, no network.

use crate::cli::output::{self, Styled};
use anyhow::Result;
use redfin_canon::{CanonicalRecord, Canonicalizer, RuleSet};
use serde::Serialize;

/// Canonicalization outcome for one input URL.
#[derive(Debug, Serialize)]
pub struct CanonOutcome {
    pub url: String,
    pub canonical: Option<CanonicalRecord>,
    pub error: Option<String>,
}

/// Canonicalize each URL. A failing URL is reported and does not stop the rest.
pub fn canonicalize_all(urls: &[String], rules: &RuleSet) -> Vec<CanonOutcome> {
    let canon = Canonicalizer::new(rules);
    urls.iter()
        .map(|url| match canon.canonicalize(url) {
            Ok(record) => CanonOutcome {
                url: url.clone(),
                canonical: Some(record),
                error: None,
            },
            Err(e) => CanonOutcome {
                url: url.clone(),
                canonical: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Run the canon command.
pub fn run(urls: &[String], rules: &RuleSet) -> Result<()> {
    let outcomes = canonicalize_all(urls, rules);

    if output::is_json() {
        output::print_json(&outcomes);
        return Ok(());
    }

    let s = Styled::new();
    for outcome in &outcomes {
        match (&outcome.canonical, &outcome.error) {
            (Some(record), _) => {
                println!("  {} {}", s.ok_sym(), s.bold(&outcome.url));
                print!("{}", output::render_canonical(&s, record));
            }
            (None, error) => {
                println!("  {} {}", s.fail_sym(), s.bold(&outcome.url));
                println!("    {}", s.red(error.as_deref().unwrap_or("unknown error")));
            }
        }
    }

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    output::print_status(&s, outcomes.len(), failed);
    Ok(())
}
