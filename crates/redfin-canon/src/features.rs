//! Feature tag normalization.
//!
//! Search URLs carry amenity tags in free-form strings such as
//! `Pool_Garage,yard`. They normalize to a sorted set of lowercase tokens.

use std::collections::BTreeSet;

/// Query parameters whose values are feature tags.
pub const FEATURE_PARAMS: &[&str] = &["features", "amenities"];

/// Normalize a raw feature string into sorted, deduplicated tokens.
///
/// `_` and `,` act as `-`, and every `-` separates tokens. The result is
/// stable under re-application: tokenizing the `-`-joined output yields the
/// same set.
pub fn tokenize(raw: &str) -> BTreeSet<String> {
    raw.to_lowercase()
        .replace(['_', ','], "-")
        .split('-')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Union the tokens of every value in `values`.
pub fn collect<'a, I>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().flat_map(tokenize).collect()
}
