//! Deduplication key for a URL.

use crate::decompose::DecomposedUrl;

/// Rebuild a URL as `https://{authority}{path}`.
///
/// The scheme is forced to https, trailing slashes are dropped (an empty
/// path becomes `/`), and the query and fragment are discarded. The path is
/// left decoded.
pub fn normalize_url(url: &DecomposedUrl) -> String {
    let path = url.path.trim_end_matches('/');
    let path = if path.is_empty() { "/" } else { path };
    format!("https://{}{}", url.authority, path)
}
