//! Shared CLI output formatting with colors, symbols, and structured display.

use redfin_canon::{CanonicalRecord, FilterValue, Location, ResolutionRecord};
use serde::Serialize;
use std::io::IsTerminal;

pub const ENV_JSON: &str = "REDFIN_CANON_JSON";
pub const ENV_QUIET: &str = "REDFIN_CANON_QUIET";
pub const ENV_VERBOSE: &str = "REDFIN_CANON_VERBOSE";
pub const ENV_NO_COLOR: &str = "REDFIN_CANON_NO_COLOR";

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() || std::env::var_os(ENV_NO_COLOR).is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    /// Never emits escape codes.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(YELLOW, s)
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint(CYAN, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }
}

/// Check if --quiet mode is active.
pub fn is_quiet() -> bool {
    std::env::var_os(ENV_QUIET).is_some()
}

/// Check if --verbose mode is active.
pub fn is_verbose() -> bool {
    std::env::var_os(ENV_VERBOSE).is_some()
}

/// Check if --json mode is active.
pub fn is_json() -> bool {
    std::env::var_os(ENV_JSON).is_some()
}

/// Print a value as pretty JSON to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize output"),
    }
}

/// Render one labelled line.
fn field(label: &str, value: &str) -> String {
    format!("    {label:<16} {value}\n")
}

/// Render a canonical record as an indented block.
pub fn render_canonical(s: &Styled, record: &CanonicalRecord) -> String {
    let mut out = String::new();
    out.push_str(&field("domain:", &record.domain));
    out.push_str(&field("intent:", &s.cyan(record.intent.as_str())));
    if let Some(entity) = &record.entity {
        out.push_str(&field("entity:", &format!("property {}", entity.id)));
    }
    match &record.location {
        Some(Location::City { id, state, name }) => {
            out.push_str(&field("location:", &format!("city {id} ({name}, {state})")));
        }
        Some(Location::QueryLocation { id }) => {
            out.push_str(&field("location:", &format!("location_id {id}")));
        }
        None => {}
    }
    if !record.features.is_empty() {
        let features: Vec<&str> = record.features.iter().map(String::as_str).collect();
        out.push_str(&field("features:", &features.join(", ")));
    }
    for (key, value) in record.filters.iter() {
        let rendered = match value {
            FilterValue::List(items) => items.join(", "),
            FilterValue::Single(item) => item.clone(),
            FilterValue::Bounds(b) => format!(
                "{}..{}",
                b.min.map(|v| v.to_string()).unwrap_or_default(),
                b.max.map(|v| v.to_string()).unwrap_or_default()
            ),
        };
        out.push_str(&field(&format!("filter.{key}:"), &rendered));
    }
    out
}

/// Render a resolution record as a titled block.
pub fn render_resolution(s: &Styled, record: &ResolutionRecord) -> String {
    let symbol = if record.is_ok() { s.ok_sym() } else { s.fail_sym() };
    let mut out = format!("  {symbol} {}\n", s.bold(&record.original_url));
    out.push_str(&field("normalized:", &record.normalized_url));
    out.push_str(&field("decoded path:", &record.decoded_url));
    for (i, hop) in record.redirect_chain.iter().enumerate() {
        out.push_str(&field(&format!("hop {}:", i + 1), &s.dim(hop)));
    }
    let final_url = record.final_url.as_deref().unwrap_or("-");
    out.push_str(&field("final:", final_url));
    let status = record
        .status_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&field("status:", &status));
    let internal = if record.is_internal {
        s.green("internal")
    } else {
        s.yellow("external")
    };
    out.push_str(&field(
        "domain:",
        &format!("{} ({internal})", record.domain.as_deref().unwrap_or("-")),
    ));
    out.push_str(&field("class:", record.classification.as_str()));
    if let Some(canonical) = &record.canonical {
        out.push_str(&render_canonical(s, canonical));
    }
    for error in &record.errors {
        out.push_str(&field("error:", &s.red(error)));
    }
    out
}

/// Print a status summary line to stderr.
pub fn print_status(s: &Styled, total: usize, failed: usize) {
    if is_quiet() {
        return;
    }
    eprintln!();
    eprintln!(
        "  {}: {} URLs, {} with errors",
        s.bold("Done"),
        total,
        failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use redfin_canon::{canonicalize, Canonicalizer, PreparedUrl, Resolution};

    #[test]
    fn test_render_canonical_plain() {
        let record = canonicalize(
            "https://www.redfin.com/city/245/NY/Albany/filter/min-beds=2,pool?features=yard",
        )
        .unwrap();
        let text = render_canonical(&Styled::plain(), &record);
        assert!(text.contains("intent:          search"));
        assert!(text.contains("city 245 (albany, ny)"));
        assert!(text.contains("features:        yard"));
        assert!(text.contains("filter.beds:     2.."));
        assert!(text.contains("filter.flags:    pool"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_render_resolution_with_errors() {
        let record = ResolutionRecord::assemble(
            PreparedUrl::new("https://www.redfin.com/home/1"),
            Resolution::failure("timed out", vec!["https://www.redfin.com/home/1".into()]),
            &Canonicalizer::default(),
        );
        let text = render_resolution(&Styled::plain(), &record);
        assert!(text.starts_with("  !! https://www.redfin.com/home/1"));
        assert!(text.contains("hop 1:"));
        assert!(text.contains("final:           -"));
        assert!(text.contains("class:           LISTING_PAGE"));
        assert!(text.contains("entity:          property 1"));
        assert!(text.contains("error:           resolve: timed out"));
    }
}
