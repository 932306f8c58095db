//! Geographic locus of a search page.

use crate::decompose::DecomposedUrl;
use serde::{Deserialize, Serialize};

/// Where a search is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Location {
    /// From a `/city/{id}/{state}/{name}` path.
    City {
        id: String,
        state: String,
        name: String,
    },
    /// From a `location_id` query parameter.
    QueryLocation { id: String },
}

/// Extract a location. The city path form wins over the query parameter.
pub fn extract_location(url: &DecomposedUrl) -> Option<Location> {
    let segments = url.segments();
    if let [first, id, state, name, ..] = segments.as_slice() {
        if first == "city" {
            return Some(Location::City {
                id: id.clone(),
                state: state.clone(),
                name: name.clone(),
            });
        }
    }

    url.first("location_id").map(|id| Location::QueryLocation {
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::decompose;

    fn location(url: &str) -> Option<Location> {
        extract_location(&decompose(url))
    }

    #[test]
    fn test_city_path() {
        assert_eq!(
            location("https://redfin.com/city/245/NY/Albany/newest-listings"),
            Some(Location::City {
                id: "245".into(),
                state: "ny".into(),
                name: "albany".into()
            })
        );
    }

    #[test]
    fn test_short_city_path_falls_back_to_query() {
        assert_eq!(location("https://redfin.com/city/245/ny"), None);
        assert_eq!(
            location("https://redfin.com/city/245/ny?location_id=9&location_id=10"),
            Some(Location::QueryLocation { id: "9".into() })
        );
    }

    #[test]
    fn test_path_wins_over_query() {
        assert!(matches!(
            location("https://redfin.com/city/1/wa/seattle?location_id=9"),
            Some(Location::City { .. })
        ));
    }

    #[test]
    fn test_city_must_be_first_segment() {
        assert_eq!(location("https://redfin.com/x/city/1/wa/seattle"), None);
    }

    #[test]
    fn test_location_json_shape() {
        let city = serde_json::to_value(Location::City {
            id: "245".into(),
            state: "ny".into(),
            name: "albany".into(),
        })
        .unwrap();
        assert_eq!(
            city,
            serde_json::json!({"type": "city", "id": "245", "state": "ny", "name": "albany"})
        );

        let query = serde_json::to_value(Location::QueryLocation { id: "7".into() }).unwrap();
        assert_eq!(query, serde_json::json!({"type": "query_location", "id": "7"}));
    }
}
