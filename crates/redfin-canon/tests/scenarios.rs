//! End-to-end canonicalization over a corpus of real-looking Redfin URLs.

use assert_json_diff::assert_json_eq;
use redfin_canon::features::tokenize;
use redfin_canon::{canonicalize, CanonError, Entity, Intent};
use serde_json::json;

const CORPUS: &[&str] = &[
    "https://www.redfin.com",
    "https://www.redfin.com/",
    "https://www.redfin.com/city/245/NY/Albany/newest-listings",
    "https://www.redfin.com/city/30749/CA/San-Francisco/filter/property-type=house+condo,min-beds=2,max-sqft=3000,pool",
    "https://www.redfin.com/houses-near-me?features=Pool_Garage,yard&amenities=fireplace",
    "https://www.redfin.com/houses-near-me?location_id=35948&utm_source=newsletter",
    "https://www.redfin.com/mortgage-get-pre-approved?context=86&location_id=35948&location_type=2&spex_v=1",
    "https://www.redfin.com/mortgage-rates?features=pool",
    "https://www.redfin.com/tours/checkout/contact?listingId=209901519&date=undefined&inquirySource=589&agentId=50490&epc=undefined&isRequestingForPartner=true",
    "https://www.redfin.com/tours/schedule/home/1",
    "https://www.redfin.com/NY/Albany/12-Elm-St-12202/home/123456",
    "https://www.redfin.com/home",
    "https://www.redfin.com/sell-a-home?propertyId=99",
    "https://www.redfin.com/seller-consultation/555/filter/pool",
    "https://www.redfin.com/zipcode/12202/filter/min-baths=2,waterfront",
    "https://www.redfin.com/news/%zz%E0%A4",
    "not a url at all",
    "",
    "::://??##",
];

#[test]
fn scenario_city_search() {
    let record =
        canonicalize("https://www.redfin.com/city/245/NY/Albany/newest-listings").unwrap();
    assert_json_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "domain": "redfin.com",
            "intent": "search",
            "entity": null,
            "location": {"type": "city", "id": "245", "state": "ny", "name": "albany"},
            "features": [],
            "filters": {}
        })
    );
}

#[test]
fn scenario_mortgage() {
    let record = canonicalize(
        "https://www.redfin.com/mortgage-get-pre-approved?context=86&location_id=35948&spex_v=1",
    )
    .unwrap();
    assert_eq!(record.intent, Intent::Mortgage);
    assert_eq!(record.entity, None);
    assert_eq!(record.location, None);
}

#[test]
fn scenario_filter_segment() {
    let record = canonicalize(
        "https://www.redfin.com/city/30749/CA/San-Francisco/filter/property-type=house+condo,min-beds=2,max-sqft=3000,pool",
    )
    .unwrap();
    assert_json_eq!(
        serde_json::to_value(&record.filters).unwrap(),
        json!({
            "property_type": ["condo", "house"],
            "beds": {"min": 2},
            "sqft": {"max": 3000},
            "flags": ["pool"]
        })
    );
}

#[test]
fn scenario_listing_entity() {
    let record = canonicalize("https://www.redfin.com/home/123456").unwrap();
    assert_eq!(record.intent, Intent::Listing);
    assert_eq!(record.entity, Some(Entity::property("123456")));
}

#[test]
fn scenario_listing_without_id() {
    let record = canonicalize("https://www.redfin.com/home/").unwrap();
    assert_eq!(record.intent, Intent::Listing);
    assert_eq!(record.entity, None);
}

#[test]
fn scenario_invalid_bound() {
    let err = canonicalize("https://www.redfin.com/city/1/ny/x/filter/min-beds=two").unwrap_err();
    assert_eq!(
        err,
        CanonError::InvalidBound {
            key: "min-beds".into(),
            value: "two".into()
        }
    );
}

#[test]
fn canonicalize_is_deterministic() {
    for url in CORPUS {
        assert_eq!(canonicalize(url), canonicalize(url), "url {url:?}");
    }
}

#[test]
fn non_search_records_carry_no_search_fields() {
    for url in CORPUS {
        let Ok(record) = canonicalize(url) else { continue };
        if record.intent != Intent::Search {
            assert!(record.features.is_empty(), "url {url:?}");
            assert!(record.filters.is_empty(), "url {url:?}");
            assert_eq!(record.location, None, "url {url:?}");
        }
        if !matches!(record.intent, Intent::Listing | Intent::SellerFunnel) {
            assert_eq!(record.entity, None, "url {url:?}");
        }
    }
}

#[test]
fn malformed_urls_do_not_fail() {
    for url in ["not a url at all", "", "::://??##", "https://www.redfin.com/news/%zz%E0%A4"] {
        let record = canonicalize(url).unwrap();
        assert_eq!(record.intent, Intent::Unknown, "url {url:?}");
    }
}

#[test]
fn feature_tokens_are_idempotent_over_corpus_queries() {
    for raw in ["Pool_Garage,yard", "fireplace", "A-b_C,,d", "  ", "x__y--z"] {
        let once = tokenize(raw);
        let joined = once.iter().cloned().collect::<Vec<_>>().join("-");
        assert_eq!(tokenize(&joined), once);
    }
}
