//! Canonicalization and classification of Redfin URLs.
//!
//! The crate is pure: every function takes a URL (or a piece of one) and
//! returns a fresh value. Network access, file loading and printing live in
//! `redfin-canon-cli`.
//!
//! ```
//! use redfin_canon::{canonicalize, Intent, Location};
//!
//! let record = canonicalize("https://www.redfin.com/city/245/NY/Albany/newest-listings").unwrap();
//! assert_eq!(record.intent, Intent::Search);
//! assert!(matches!(record.location, Some(Location::City { .. })));
//! ```

pub mod canonical;
pub mod classify;
pub mod decompose;
pub mod entity;
pub mod error;
pub mod features;
pub mod filters;
pub mod intent;
pub mod location;
pub mod normalize;
pub mod resolution;
pub mod rules;
pub mod site;

pub use canonical::{canonicalize, CanonicalRecord, Canonicalizer};
pub use classify::{classify_page, PageClass};
pub use decompose::{decompose, DecomposedUrl};
pub use entity::{Entity, EntityKind};
pub use error::{CanonError, Result};
pub use filters::{Bounds, FilterSet, FilterValue};
pub use intent::Intent;
pub use location::Location;
pub use normalize::normalize_url;
pub use resolution::{PreparedUrl, Resolution, ResolutionRecord};
pub use rules::{MatchMode, RuleSet};
pub use site::is_site_domain;
