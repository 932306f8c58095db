//! Membership check for the site's own hostnames.

use crate::decompose::decompose;

/// Hostnames that belong to the site.
pub const SITE_HOSTS: &[&str] = &["www.redfin.com", "redfin.com", "ratelimited.redfin.com"];

/// Whether `authority` is exactly one of [`SITE_HOSTS`] (case-insensitive).
pub fn is_site_host(authority: &str) -> bool {
    let authority = authority.to_lowercase();
    SITE_HOSTS.contains(&authority.as_str())
}

/// Whether the authority of `url` is one of the site's hostnames.
pub fn is_site_domain(url: &str) -> bool {
    is_site_host(&decompose(url).authority)
}
