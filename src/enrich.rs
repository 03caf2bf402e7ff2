use std::collections::HashMap;

use futures::future::join_all;
use uuid::Uuid;

use crate::clients::WalkTimeSource;
use crate::distance::resolve_walk_minutes;
use crate::geo::Coordinate;
use crate::models::{DietaryRestrictions, EnrichedSuggestion, Suggestion};

/// Attach dietary fit, vote count, walking minutes, and price tier to each
/// suggestion, preserving input order. Distance lookups for all
/// coordinate-bearing suggestions fan out concurrently and all complete
/// before the pass returns; a failed lookup degrades that item only.
pub async fn enrich_suggestions(
    suggestions: Vec<Suggestion>,
    home: Coordinate,
    dietary: &DietaryRestrictions,
    tally: &HashMap<Uuid, i64>,
    walk_times: &dyn WalkTimeSource,
) -> Vec<EnrichedSuggestion> {
    let distances = join_all(suggestions.iter().map(|s| {
        let dest = s.external_ref.as_ref().and_then(|r| r.coords);
        async move {
            match dest {
                Some(d) => resolve_walk_minutes(walk_times, home, d).await,
                None => None,
            }
        }
    }))
    .await;

    suggestions
        .into_iter()
        .zip(distances)
        .map(|(s, distance_min)| {
            let fit = s
                .external_ref
                .as_ref()
                .and_then(|r| r.categories.as_deref())
                .map(|cats| dietary.fits(cats))
                .unwrap_or(true);
            let price_tier = s.external_ref.as_ref().and_then(|r| r.price_tier);
            let votes = tally.get(&s.id).copied().unwrap_or(0);
            EnrichedSuggestion {
                suggestion: s,
                dietary_fit: Some(fit),
                votes,
                distance_min,
                price_tier,
            }
        })
        .collect()
}
