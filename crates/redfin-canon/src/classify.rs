//! Classify a Redfin page by its path.
//!
//! This table is versioned separately from the intent rules in
//! [`crate::rules`]: it matches the raw decoded path case-sensitively, mixes
//! exact, prefix and substring tests, and uses its own labels. Use
//! [`PageClass::intent`] to translate a label into the intent vocabulary.

use crate::intent::Intent;
use crate::rules::PathPattern;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Page label produced by the resolution pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageClass {
    Home,
    SearchLanding,
    CityPage,
    ListingPage,
    MortgageFunnel,
    CheckoutFlow,
    SearchResults,
    #[default]
    Unknown,
}

impl PageClass {
    pub fn as_str(self) -> &'static str {
        match self {
            PageClass::Home => "HOME",
            PageClass::SearchLanding => "SEARCH_LANDING",
            PageClass::CityPage => "CITY_PAGE",
            PageClass::ListingPage => "LISTING_PAGE",
            PageClass::MortgageFunnel => "MORTGAGE_FUNNEL",
            PageClass::CheckoutFlow => "CHECKOUT_FLOW",
            PageClass::SearchResults => "SEARCH_RESULTS",
            PageClass::Unknown => "UNKNOWN",
        }
    }

    /// The intent this label corresponds to.
    pub fn intent(self) -> Intent {
        match self {
            PageClass::SearchLanding | PageClass::CityPage | PageClass::SearchResults => {
                Intent::Search
            }
            PageClass::ListingPage => Intent::Listing,
            PageClass::MortgageFunnel => Intent::Mortgage,
            PageClass::CheckoutFlow => Intent::Checkout,
            PageClass::Home | PageClass::Unknown => Intent::Unknown,
        }
    }
}

impl fmt::Display for PageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the page table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRule {
    pub class: PageClass,
    pub pattern: PathPattern,
}

static PAGE_RULES: LazyLock<Vec<PageRule>> = LazyLock::new(|| {
    let rule = |class, pattern| PageRule { class, pattern };
    vec![
        rule(PageClass::Home, PathPattern::Root),
        rule(PageClass::SearchLanding, PathPattern::Exact("/houses-near-me".into())),
        rule(PageClass::CityPage, PathPattern::Prefix("/city/".into())),
        rule(PageClass::ListingPage, PathPattern::Prefix("/home/".into())),
        rule(
            PageClass::MortgageFunnel,
            PathPattern::Prefix("/mortgage-get-pre-approved".into()),
        ),
        rule(PageClass::CheckoutFlow, PathPattern::Prefix("/tours/checkout".into())),
        rule(PageClass::SearchResults, PathPattern::Contains("/filter/".into())),
    ]
});

/// The ordered page rules.
pub fn page_rules() -> &'static [PageRule] {
    PAGE_RULES.as_slice()
}

/// Classify a raw decoded path.
pub fn classify_page(path: &str) -> PageClass {
    page_rules()
        .iter()
        .find(|rule| rule.pattern.matches(path))
        .map(|rule| rule.class)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_pages() {
        assert_eq!(classify_page("/"), PageClass::Home);
        assert_eq!(classify_page("/houses-near-me"), PageClass::SearchLanding);
        assert_eq!(classify_page("/city/245/NY/Albany"), PageClass::CityPage);
        assert_eq!(classify_page("/home/123"), PageClass::ListingPage);
        assert_eq!(
            classify_page("/mortgage-get-pre-approved"),
            PageClass::MortgageFunnel
        );
        assert_eq!(classify_page("/tours/checkout/contact"), PageClass::CheckoutFlow);
        assert_eq!(classify_page("/zipcode/94110/filter/pool"), PageClass::SearchResults);
        assert_eq!(classify_page("/news"), PageClass::Unknown);
    }

    #[test]
    fn test_empty_path_is_not_home() {
        // `https://www.redfin.com` decomposes to an empty path.
        assert_eq!(classify_page(""), PageClass::Unknown);
        assert_eq!(classify_page("//"), PageClass::Unknown);
    }

    #[test]
    fn test_rules_differ_from_intent_rules() {
        // Exact match only, unlike the substring intent rules.
        assert_eq!(classify_page("/houses-near-me/ny"), PageClass::Unknown);
        // Prefix match only.
        assert_eq!(classify_page("/ca/oakland/home/1"), PageClass::Unknown);
        // Case-sensitive.
        assert_eq!(classify_page("/City/1/NY/x"), PageClass::Unknown);
        // City wins over filter because it comes first.
        assert_eq!(classify_page("/city/1/ny/x/filter/pool"), PageClass::CityPage);
    }

    #[test]
    fn test_conversion_to_intent() {
        assert_eq!(PageClass::CityPage.intent(), Intent::Search);
        assert_eq!(PageClass::SearchLanding.intent(), Intent::Search);
        assert_eq!(PageClass::SearchResults.intent(), Intent::Search);
        assert_eq!(PageClass::ListingPage.intent(), Intent::Listing);
        assert_eq!(PageClass::MortgageFunnel.intent(), Intent::Mortgage);
        assert_eq!(PageClass::CheckoutFlow.intent(), Intent::Checkout);
        assert_eq!(PageClass::Home.intent(), Intent::Unknown);
        assert_eq!(PageClass::Unknown.intent(), Intent::Unknown);
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(
            serde_json::to_string(&PageClass::MortgageFunnel).unwrap(),
            "\"MORTGAGE_FUNNEL\""
        );
        assert_eq!(PageClass::CheckoutFlow.to_string(), "CHECKOUT_FLOW");
    }
}
