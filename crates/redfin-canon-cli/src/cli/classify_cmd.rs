//! `redfin-canon classify <url>...`: show the page label and the intent
//! side by side.
//!
//! The two come from separate rule tables; the output flags the URLs where
//! the page label's intent and the detected intent disagree.

use crate::cli::output::{self, Styled};
use anyhow::Result;
use redfin_canon::decompose::decompose;
use redfin_canon::intent::classify_intent;
use redfin_canon::{classify_page, Intent, PageClass, RuleSet};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Classification {
    pub url: String,
    pub path: String,
    pub classification: PageClass,
    /// Intent equivalent of `classification`.
    pub classification_intent: Intent,
    /// Intent from the intent rules.
    pub intent: Intent,
}

impl Classification {
    pub fn agrees(&self) -> bool {
        self.classification_intent == self.intent
    }
}

pub fn classify(url: &str, rules: &RuleSet) -> Classification {
    let path = decompose(url).path;
    let classification = classify_page(&path);
    Classification {
        url: url.to_string(),
        classification,
        classification_intent: classification.intent(),
        intent: classify_intent(&path, rules),
        path,
    }
}

/// Run the classify command.
pub fn run(urls: &[String], rules: &RuleSet) -> Result<()> {
    let results: Vec<Classification> = urls.iter().map(|u| classify(u, rules)).collect();

    if output::is_json() {
        output::print_json(&results);
        return Ok(());
    }

    let s = Styled::new();
    for c in &results {
        let mark = if c.agrees() {
            s.ok_sym().to_string()
        } else {
            s.yellow("~~")
        };
        println!(
            "  {mark} {:<16} {:<14} {}",
            c.classification.as_str(),
            c.intent.as_str(),
            c.url
        );
        if output::is_verbose() && !c.agrees() {
            println!(
                "    {}",
                s.dim(&format!(
                    "page label maps to `{}`, intent rules say `{}`",
                    c.classification_intent, c.intent
                ))
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agreeing_tables() {
        let c = classify("https://www.redfin.com/city/245/NY/Albany", RuleSet::builtin());
        assert_eq!(c.classification, PageClass::CityPage);
        assert_eq!(c.intent, Intent::Search);
        assert!(c.agrees());
    }

    #[test]
    fn test_disagreeing_tables() {
        // Substring intent rules see a listing; the prefix-only page table does not.
        let c = classify("https://www.redfin.com/NY/Albany/1-Elm-St/home/7", RuleSet::builtin());
        assert_eq!(c.classification, PageClass::Unknown);
        assert_eq!(c.intent, Intent::Listing);
        assert!(!c.agrees());
    }
}
