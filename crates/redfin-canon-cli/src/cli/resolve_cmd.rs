//! `redfin-canon resolve <url>...`: follow redirects and report each URL.

use crate::batch::BatchRunner;
use crate::cli::output::{self, Styled};
use crate::cli::NetArgs;
use crate::throttle::Throttle;
use anyhow::Result;
use redfin_canon::{Canonicalizer, ResolutionRecord, RuleSet};
use std::sync::Arc;

/// Run the resolve command.
pub async fn run(urls: &[String], net: &NetArgs, rules: &RuleSet) -> Result<()> {
    let runner = BatchRunner::new(
        Arc::new(net.resolver()?),
        Canonicalizer::new(rules),
        Throttle::unlimited(),
        net.timeout(),
        urls.len(),
    );
    let records = runner.run(urls).await;
    print_records(&records);
    Ok(())
}

/// Print records as JSON (a single object for one record) or styled blocks.
pub fn print_records(records: &[ResolutionRecord]) {
    if output::is_json() {
        match records {
            [single] => output::print_json(single),
            _ => output::print_json(records),
        }
        return;
    }

    let s = Styled::new();
    for record in records {
        println!("{}", output::render_resolution(&s, record));
    }
    let failed = records.iter().filter(|r| !r.is_ok()).count();
    output::print_status(&s, records.len(), failed);
}
