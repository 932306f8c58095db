//! Parser for the `/filter/...` path mini-language of search URLs.
//!
//! A filter segment is a comma-separated list of tokens:
//!
//! - `pool`: a valueless flag, collected under the reserved `flags` key.
//! - `property-type=house+condo`: property types, sorted, under `property_type`.
//! - `min-beds=2`, `max-sqft=3000`: integer bounds on `beds`, `baths` or `sqft`.
//! - `key=a+b`: anything else; one value is kept as a string, several as a list.
//!
//! The keys written by the first three kinds are reserved. A generic
//! `key=...` token naming a reserved key (`beds=3`, `flags=x`) is skipped,
//! so each key holds exactly one kind of value. Within one kind the later
//! token wins, except that bounds for the same field merge.
//!
//! A bound whose value is not an integer fails the whole parse with
//! [`CanonError::InvalidBound`].

use crate::decompose::percent_decode;
use crate::error::{CanonError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Path marker that introduces a filter segment.
pub const FILTER_MARKER: &str = "/filter/";

/// Reserved key holding valueless tokens.
pub const FLAGS_KEY: &str = "flags";

const PROPERTY_TYPE_TOKEN: &str = "property-type";
const PROPERTY_TYPE_KEY: &str = "property_type";

/// Output keys owned by flags, property types and bounds.
const RESERVED_KEYS: &[&str] = &[FLAGS_KEY, PROPERTY_TYPE_KEY, "beds", "baths", "sqft"];

static BOUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(min|max)-(beds|baths|sqft)$").expect("bound key pattern is a valid regex")
});

/// Inclusive numeric range on one field. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// The value stored under one filter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    List(Vec<String>),
    Bounds(Bounds),
    Single(String),
}

/// Parsed filters keyed by name. Key order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, FilterValue>);

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bounds recorded for `field` (`beds`, `baths` or `sqft`).
    pub fn bounds(&self, field: &str) -> Option<Bounds> {
        match self.0.get(field) {
            Some(FilterValue::Bounds(b)) => Some(*b),
            _ => None,
        }
    }

    /// Sorted valueless tokens.
    pub fn flags(&self) -> &[String] {
        match self.0.get(FLAGS_KEY) {
            Some(FilterValue::List(flags)) => flags,
            _ => &[],
        }
    }

    pub fn property_types(&self) -> &[String] {
        match self.0.get(PROPERTY_TYPE_KEY) {
            Some(FilterValue::List(types)) => types,
            _ => &[],
        }
    }

    fn set_bound(&mut self, field: &str, bound: &str, value: i64) {
        let entry = self
            .0
            .entry(field.to_string())
            .or_insert(FilterValue::Bounds(Bounds::default()));
        if let FilterValue::Bounds(bounds) = entry {
            if bound == "min" {
                bounds.min = Some(value);
            } else {
                bounds.max = Some(value);
            }
        }
    }
}

/// The text after the first `/filter/` in `path`, if the marker is present.
pub fn filter_segment(path: &str) -> Option<&str> {
    path.find(FILTER_MARKER)
        .map(|pos| &path[pos + FILTER_MARKER.len()..])
}

/// Parse a filter segment (the text after `/filter/`).
pub fn parse_filters(segment: &str) -> Result<FilterSet> {
    let mut filters = FilterSet::default();
    let mut flags = BTreeSet::new();

    for raw in segment.trim_matches('/').split(',') {
        let decoded = percent_decode(raw).to_lowercase();
        let token = decoded.trim();
        if token.is_empty() {
            continue;
        }

        let Some((key, value)) = token.split_once('=') else {
            flags.insert(token.to_string());
            continue;
        };
        let key = key.trim();
        let values: Vec<String> = value
            .split('+')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect();

        if key == PROPERTY_TYPE_TOKEN {
            let types: BTreeSet<String> = values.into_iter().collect();
            filters.0.insert(
                PROPERTY_TYPE_KEY.to_string(),
                FilterValue::List(types.into_iter().collect()),
            );
        } else if let Some(caps) = BOUND_RE.captures(key) {
            let raw_value = values.first().map(String::as_str).unwrap_or("");
            let parsed = raw_value
                .parse::<i64>()
                .map_err(|_| CanonError::InvalidBound {
                    key: key.to_string(),
                    value: raw_value.to_string(),
                })?;
            filters.set_bound(&caps[2], &caps[1], parsed);
        } else if RESERVED_KEYS.contains(&key) {
            tracing::debug!(key, "skipping generic filter token with a reserved key");
        } else {
            let value = if values.len() > 1 {
                FilterValue::List(values)
            } else {
                FilterValue::Single(values.into_iter().next().unwrap_or_default())
            };
            filters.0.insert(key.to_string(), value);
        }
    }

    if !flags.is_empty() {
        filters.0.insert(
            FLAGS_KEY.to_string(),
            FilterValue::List(flags.into_iter().collect()),
        );
    }

    tracing::debug!(keys = filters.len(), "parsed filter segment");
    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mixed_segment() {
        let filters =
            parse_filters("property-type=house+condo,min-beds=2,max-sqft=3000,pool").unwrap();
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            json!({
                "property_type": ["condo", "house"],
                "beds": {"min": 2},
                "sqft": {"max": 3000},
                "flags": ["pool"]
            })
        );
        assert_eq!(filters.bounds("beds"), Some(Bounds { min: Some(2), max: None }));
        assert_eq!(filters.flags(), ["pool"]);
        assert_eq!(filters.property_types(), ["condo", "house"]);
    }

    #[test]
    fn test_bounds_merge_per_field() {
        let filters = parse_filters("min-beds=2,max-beds=4,min-baths=1").unwrap();
        assert_eq!(filters.bounds("beds"), Some(Bounds { min: Some(2), max: Some(4) }));
        assert_eq!(filters.bounds("baths"), Some(Bounds { min: Some(1), max: None }));
        assert_eq!(filters.bounds("sqft"), None);
    }

    #[test]
    fn test_invalid_bound_is_an_error() {
        let err = parse_filters("min-beds=two").unwrap_err();
        assert_eq!(
            err,
            CanonError::InvalidBound {
                key: "min-beds".into(),
                value: "two".into()
            }
        );
        assert!(parse_filters("pool,max-sqft=").is_err());
        assert!(parse_filters("min-baths=1.5").is_err());
    }

    #[test]
    fn test_generic_keys_collapse_single_values() {
        let filters = parse_filters("min-price=500k,status=active+pending,sort=lo-price").unwrap();
        assert_eq!(
            filters.get("min-price"),
            Some(&FilterValue::Single("500k".into()))
        );
        assert_eq!(
            filters.get("status"),
            Some(&FilterValue::List(vec!["active".into(), "pending".into()]))
        );
        assert_eq!(filters.get("sort"), Some(&FilterValue::Single("lo-price".into())));
    }

    #[test]
    fn test_flags_are_sorted_and_deduplicated() {
        let filters = parse_filters("/Pool,garage,,pool, fireplace /").unwrap();
        assert_eq!(filters.flags(), ["fireplace", "garage", "pool"]);
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_tokens_are_decoded_and_lowercased() {
        let filters = parse_filters("property-type=House%2BTownhouse,has%2Dview").unwrap();
        assert_eq!(filters.property_types(), ["house", "townhouse"]);
        assert_eq!(filters.flags(), ["has-view"]);
    }

    #[test]
    fn test_reserved_keys_keep_their_kind() {
        let segment = "min-beds=2,beds=3,property-type=condo,property_type=x,\
                       sqft=9,max-sqft=100,flags=y,pool";
        let filters = parse_filters(segment).unwrap();
        assert_eq!(filters.bounds("beds"), Some(Bounds { min: Some(2), max: None }));
        assert_eq!(filters.bounds("sqft"), Some(Bounds { min: None, max: Some(100) }));
        assert_eq!(filters.property_types(), ["condo"]);
        assert_eq!(filters.flags(), ["pool"]);
        assert_eq!(filters.len(), 4);

        let filters = parse_filters("baths=3,min-baths=1").unwrap();
        assert_eq!(filters.bounds("baths"), Some(Bounds { min: Some(1), max: None }));
    }

    #[test]
    fn test_empty_segment() {
        assert!(parse_filters("").unwrap().is_empty());
        assert!(parse_filters("/").unwrap().is_empty());
    }

    #[test]
    fn test_filter_segment() {
        assert_eq!(
            filter_segment("/city/1/ca/sf/filter/pool,min-beds=2"),
            Some("pool,min-beds=2")
        );
        assert_eq!(filter_segment("/city/1/ca/sf"), None);
    }

    #[test]
    fn test_filter_set_round_trips_through_json() {
        let filters =
            parse_filters("property-type=condo,min-beds=1,sort=new,view+water,pool").unwrap();
        let json = serde_json::to_string(&filters).unwrap();
        let back: FilterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filters);
    }
}
