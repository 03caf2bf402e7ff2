//! The enrichment pass: per-item dietary fit, vote defaults, concurrent
//! distance fan-out, and per-item degradation when lookups go wrong.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use lunchpick::enrich::enrich_suggestions;
use lunchpick::geo::{self, Coordinate};
use lunchpick::models::{ExternalRef, Suggestion, SuggestionKind};

mod common;
use common::{restrictions, FailingWalkTimes, MappedWalkTimes, HOME};

const SUSHI_COORDS: Coordinate = Coordinate {
    lat: 59.916,
    lng: 10.755,
};
const STEAK_COORDS: Coordinate = Coordinate {
    lat: 59.920,
    lng: 10.740,
};

fn suggestion(label: &str, external_ref: Option<ExternalRef>) -> Suggestion {
    Suggestion {
        id: Uuid::new_v4(),
        session_id: Uuid::nil(),
        kind: SuggestionKind::Restaurant,
        label: label.to_string(),
        external_ref,
        created_by: None,
        created_at: Utc::now(),
    }
}

fn place(coords: Coordinate, categories: &[&str], price_tier: Option<i32>) -> ExternalRef {
    ExternalRef {
        place_id: Some("place".to_string()),
        categories: Some(categories.iter().map(|c| c.to_string()).collect()),
        coords: Some(coords),
        price_tier,
        url: None,
    }
}

#[tokio::test]
async fn enrichment_fills_every_computed_field() {
    let sushi = suggestion("sushi", Some(place(SUSHI_COORDS, &["Sushi"], Some(2))));
    let steak = suggestion("steak", Some(place(STEAK_COORDS, &["Steakhouse"], Some(4))));
    let idea = suggestion("just an idea", None);

    let mut tally = HashMap::new();
    tally.insert(sushi.id, 3i64);

    let walk = MappedWalkTimes::new(vec![(SUSHI_COORDS, 7), (STEAK_COORDS, 12)]);
    let dietary = restrictions(&["steakhouse"]);

    let enriched = enrich_suggestions(
        vec![sushi.clone(), steak.clone(), idea.clone()],
        HOME,
        &dietary,
        &tally,
        &walk,
    )
    .await;

    assert_eq!(enriched.len(), 3);
    // Input order survives.
    assert_eq!(enriched[0].suggestion.id, sushi.id);
    assert_eq!(enriched[1].suggestion.id, steak.id);
    assert_eq!(enriched[2].suggestion.id, idea.id);

    assert_eq!(enriched[0].dietary_fit, Some(true));
    assert_eq!(enriched[0].votes, 3);
    assert_eq!(enriched[0].distance_min, Some(7));
    assert_eq!(enriched[0].price_tier, Some(2));

    // Category matches an active restriction.
    assert_eq!(enriched[1].dietary_fit, Some(false));
    assert_eq!(enriched[1].votes, 0);
    assert_eq!(enriched[1].distance_min, Some(12));
    assert_eq!(enriched[1].price_tier, Some(4));

    // No external data: fit by default, no distance, no price.
    assert_eq!(enriched[2].dietary_fit, Some(true));
    assert_eq!(enriched[2].votes, 0);
    assert_eq!(enriched[2].distance_min, None);
    assert_eq!(enriched[2].price_tier, None);
}

#[tokio::test]
async fn coordinate_free_suggestions_never_hit_the_walk_source() {
    let items = vec![
        suggestion("idea one", None),
        suggestion("idea two", None),
        suggestion("mapped", Some(place(SUSHI_COORDS, &[], None))),
    ];
    let walk = MappedWalkTimes::new(vec![(SUSHI_COORDS, 5)]);

    let enriched =
        enrich_suggestions(items, HOME, &restrictions(&[]), &HashMap::new(), &walk).await;

    assert_eq!(walk.call_count(), 1);
    assert_eq!(enriched[0].distance_min, None);
    assert_eq!(enriched[1].distance_min, None);
    assert_eq!(enriched[2].distance_min, Some(5));
}

#[tokio::test]
async fn failing_walk_source_degrades_to_estimates_per_item() {
    let items = vec![
        suggestion("mapped", Some(place(SUSHI_COORDS, &[], None))),
        suggestion("idea", None),
    ];

    let enriched = enrich_suggestions(
        items,
        HOME,
        &restrictions(&[]),
        &HashMap::new(),
        &FailingWalkTimes,
    )
    .await;

    // The outage never surfaces; the coordinate-bearing item still gets a
    // distance, from the estimator.
    assert_eq!(
        enriched[0].distance_min,
        Some(geo::walk_minutes(HOME, SUSHI_COORDS))
    );
    assert_eq!(enriched[1].distance_min, None);
}

#[tokio::test]
async fn empty_restriction_set_fits_everything() {
    let items = vec![
        suggestion("steak", Some(place(STEAK_COORDS, &["Steakhouse"], None))),
        suggestion("sushi", Some(place(SUSHI_COORDS, &["Sushi"], None))),
    ];
    let walk = MappedWalkTimes::new(vec![]);

    let enriched =
        enrich_suggestions(items, HOME, &restrictions(&[]), &HashMap::new(), &walk).await;

    assert!(enriched.iter().all(|s| s.dietary_fit == Some(true)));
}
