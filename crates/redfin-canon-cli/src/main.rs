//! redfin-canon CLI: canonicalize, classify and resolve Redfin URLs.
//!
//! # Usage
//!
//! ```bash
//! redfin-canon canon "https://www.redfin.com/city/245/NY/Albany/filter/min-beds=2"
//! redfin-canon classify https://www.redfin.com/houses-near-me
//! redfin-canon resolve https://redfin.com/home/123 --json
//! redfin-canon batch urls.txt --concurrency 8 --delay-ms 250
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use redfin_canon::MatchMode;
use redfin_canon_cli::cli::{self, output, NetArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Canonicalize, classify and resolve Redfin URLs.
#[derive(Parser)]
#[command(name = "redfin-canon", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Suppress status lines on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging and extra detail
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// JSON file with intent rules (default: built-in rules)
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// How intent patterns match the path: substring or prefix
    #[arg(long, global = true, value_name = "MODE")]
    match_mode: Option<MatchMode>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the canonical record of each URL (no network)
    Canon {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Show page classification and intent for each URL (no network)
    Classify {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Follow redirects for each URL and report the result
    Resolve {
        #[arg(required = true)]
        urls: Vec<String>,
        #[command(flatten)]
        net: NetArgs,
    },
    /// Resolve every URL listed in a file, one per line
    Batch {
        file: PathBuf,
        #[command(flatten)]
        net: NetArgs,
        /// Maximum requests in flight
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
        /// Minimum delay between request starts, in milliseconds
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },
}

fn init_tracing(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,redfin_canon=debug,redfin_canon_cli=debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set before any threads exist; the output layer reads these.
    if cli.json {
        std::env::set_var(output::ENV_JSON, "1");
    }
    if cli.quiet {
        std::env::set_var(output::ENV_QUIET, "1");
    }
    if cli.verbose {
        std::env::set_var(output::ENV_VERBOSE, "1");
    }
    if cli.no_color {
        std::env::set_var(output::ENV_NO_COLOR, "1");
    }

    init_tracing(cli.verbose, cli.log_json);

    let rules = cli::load_rules(cli.rules.as_deref(), cli.match_mode)?;

    match &cli.command {
        Command::Canon { urls } => cli::canon_cmd::run(urls, &rules),
        Command::Classify { urls } => cli::classify_cmd::run(urls, &rules),
        Command::Resolve { urls, net } => {
            runtime()?.block_on(cli::resolve_cmd::run(urls, net, &rules))
        }
        Command::Batch {
            file,
            net,
            concurrency,
            delay_ms,
        } => runtime()?.block_on(cli::batch_cmd::run(
            file,
            net,
            *concurrency,
            *delay_ms,
            &rules,
        )),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
