//! Assemble the canonical, intent-aware representation of a URL.
//!
//! The canonical record describes what a URL means; it is not meant for
//! equality checks between URLs. Only fields relevant to the detected
//! intent are filled:
//!
//! | intent                      | entity | location / features / filters |
//! |-----------------------------|--------|-------------------------------|
//! | `listing`, `seller_funnel`  | yes    | no                            |
//! | `search`                    | no     | yes                           |
//! | everything else             | no     | no                            |

use crate::decompose::{decompose, DecomposedUrl, QueryMap};
use crate::entity::{extract_entity, Entity};
use crate::error::Result;
use crate::features::{self, FEATURE_PARAMS};
use crate::filters::{filter_segment, parse_filters, FilterSet};
use crate::intent::{classify_intent, Intent};
use crate::location::{extract_location, Location};
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Authority without a leading `www.`.
    pub domain: String,
    pub intent: Intent,
    pub entity: Option<Entity>,
    pub location: Option<Location>,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub filters: FilterSet,
}

/// Canonicalizer bound to a rule set.
#[derive(Debug, Clone, Copy)]
pub struct Canonicalizer<'r> {
    rules: &'r RuleSet,
}

impl Default for Canonicalizer<'static> {
    fn default() -> Self {
        Self::new(RuleSet::builtin())
    }
}

impl<'r> Canonicalizer<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Canonicalize a raw URL.
    ///
    /// The raw URL is lowercased before it is decomposed. Percent-escapes
    /// are decoded afterwards, so query values may still carry uppercase
    /// letters (`?location_id=%41BC` yields `Abc`). The decoded path is
    /// lowercased again and drives intent, entity, location and filters.
    pub fn canonicalize(&self, raw: &str) -> Result<CanonicalRecord> {
        let mut url = decompose(&raw.to_lowercase());
        url.path = url.path.to_lowercase();

        let domain = url
            .authority
            .strip_prefix("www.")
            .unwrap_or(&url.authority)
            .to_string();
        let intent = classify_intent(&url.path, self.rules);
        let entity = extract_entity(intent, &url);

        let mut record = CanonicalRecord {
            domain,
            intent,
            entity,
            location: None,
            features: BTreeSet::new(),
            filters: FilterSet::default(),
        };

        if intent == Intent::Search {
            let query = self.clean_query(&url);
            record.features = features::collect(
                FEATURE_PARAMS
                    .iter()
                    .filter_map(|key| query.get(*key))
                    .flatten()
                    .map(String::as_str),
            );
            if let Some(segment) = filter_segment(&url.path) {
                record.filters = parse_filters(segment)?;
            }
            record.location = extract_location(&url);
        }

        Ok(record)
    }

    /// Query parameters with the tracking parameters of the rule set removed.
    pub fn clean_query(&self, url: &DecomposedUrl) -> QueryMap {
        url.query
            .iter()
            .filter(|(key, _)| !self.rules.is_ignored_param(key))
            .map(|(key, values)| (key.clone(), values.clone()))
            .collect()
    }
}

/// Canonicalize with the built-in rules.
pub fn canonicalize(raw: &str) -> Result<CanonicalRecord> {
    Canonicalizer::default().canonicalize(raw)
}
