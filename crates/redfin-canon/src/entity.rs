//! Extract the domain entity a page is about.

use crate::decompose::DecomposedUrl;
use crate::intent::Intent;
use serde::{Deserialize, Serialize};

/// Kind of entity. Only properties are produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Property,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: String,
}

impl Entity {
    pub fn property(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Property,
            id: id.into(),
        }
    }
}

/// Extract the entity for `intent`, or `None` when the intent carries no
/// entity or the expected path structure is missing.
pub fn extract_entity(intent: Intent, url: &DecomposedUrl) -> Option<Entity> {
    let segments = url.segments();
    match intent {
        Intent::Listing => segment_after(&segments, "home").map(Entity::property),
        Intent::SellerFunnel => url
            .first("propertyid")
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| segment_after(&segments, "seller-consultation"))
            .map(Entity::property),
        _ => None,
    }
}

/// The segment following the first occurrence of `marker`.
fn segment_after(segments: &[String], marker: &str) -> Option<String> {
    let pos = segments.iter().position(|s| s == marker)?;
    segments
        .get(pos + 1)
        .filter(|s| !s.is_empty())
        .cloned()
}
