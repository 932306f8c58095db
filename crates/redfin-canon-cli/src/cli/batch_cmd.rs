//! `redfin-canon batch <file>`: resolve every URL listed in a file.

use crate::batch::{load_urls, BatchRunner};
use crate::cli::resolve_cmd::print_records;
use crate::cli::{output, NetArgs};
use crate::throttle::Throttle;
use anyhow::Result;
use redfin_canon::{Canonicalizer, RuleSet};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Run the batch command.
pub async fn run(
    file: &Path,
    net: &NetArgs,
    concurrency: usize,
    delay_ms: u64,
    rules: &RuleSet,
) -> Result<()> {
    let urls = load_urls(file)?;
    if !output::is_quiet() && !output::is_json() {
        eprintln!("  Resolving {} URLs from {}...", urls.len(), file.display());
        eprintln!();
    }

    let runner = BatchRunner::new(
        Arc::new(net.resolver()?),
        Canonicalizer::new(rules),
        Throttle::new(concurrency, Duration::from_millis(delay_ms)),
        net.timeout(),
        concurrency,
    );
    let records = runner.run(&urls).await;

    if output::is_json() {
        output::print_json(&records);
    } else {
        print_records(&records);
    }
    Ok(())
}
