//! Split raw URL strings into their components.
//!
//! Decomposition is total: any string, well-formed or not, produces a
//! [`DecomposedUrl`]. Broken percent escapes are kept literally and bytes
//! that do not form UTF-8 after decoding are replaced with U+FFFD.
//!
//! Query policy: parameters without `=` (`?pool`) and with an empty value
//! (`?pool=`) are both kept with the empty string as their value, so they
//! stay retrievable through [`DecomposedUrl::query`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Generic URI grammar. Every component is optional, so every input matches.
static URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("URI grammar is a valid regex")
});

/// Query parameters keyed by name. Values keep their encounter order.
pub type QueryMap = BTreeMap<String, Vec<String>>;

/// A URL broken into decoded components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecomposedUrl {
    pub scheme: String,
    /// Host (and port, if any), lowercased.
    pub authority: String,
    /// Percent-decoded path.
    pub path: String,
    /// Form-decoded query parameters.
    pub query: QueryMap,
    pub fragment: String,
}

impl DecomposedUrl {
    /// First value of a query parameter.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a query parameter, empty if it is not present.
    pub fn values(&self, key: &str) -> &[String] {
        self.query.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lowercased path segments with leading and trailing slashes removed.
    ///
    /// Interior empty segments (`/a//b`) are kept so that positions line up
    /// with the raw path.
    pub fn segments(&self) -> Vec<String> {
        segments(&self.path)
    }
}

/// Decompose a raw URL string.
pub fn decompose(raw: &str) -> DecomposedUrl {
    let Some(caps) = URI_RE.captures(raw) else {
        // The grammar accepts everything; treat the input as a bare path anyway.
        return DecomposedUrl {
            path: percent_decode(raw),
            ..Default::default()
        };
    };

    let part = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    DecomposedUrl {
        scheme: part(1).to_lowercase(),
        authority: part(2).to_lowercase(),
        path: percent_decode(part(3)),
        query: parse_query(part(4)),
        fragment: part(5).to_string(),
    }
}

/// Percent-decode a string, keeping malformed escapes as they are.
pub fn percent_decode(s: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(s.as_bytes())).into_owned()
}

/// Parse a raw query string with form-urlencoded rules.
pub fn parse_query(query: &str) -> QueryMap {
    let mut map = QueryMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        map.entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    map
}

/// Lowercased segments of a decoded path, slashes trimmed from both ends.
pub fn segments(path: &str) -> Vec<String> {
    path.trim_matches('/')
        .split('/')
        .map(str::to_lowercase)
        .collect()
}
