use std::cmp::Ordering;

use rand::Rng;

use crate::models::EnrichedSuggestion;

/// Alternate single-key orderings for a results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Votes,
    Distance,
    Price,
    Dietary,
}

impl SortKey {
    /// Parse a query-string value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "votes" => Some(SortKey::Votes),
            "distance" => Some(SortKey::Distance),
            "price" => Some(SortKey::Price),
            "dietary" => Some(SortKey::Dietary),
            _ => None,
        }
    }
}

struct Keyed {
    item: EnrichedSuggestion,
    rand: f64,
}

fn compare(a: &Keyed, b: &Keyed) -> Ordering {
    // Only an explicit false demotes; an absent flag counts as fit.
    let a_unfit = a.item.dietary_fit == Some(false);
    let b_unfit = b.item.dietary_fit == Some(false);
    if a_unfit != b_unfit {
        return if a_unfit { Ordering::Greater } else { Ordering::Less };
    }
    match b.item.votes.cmp(&a.item.votes) {
        Ordering::Equal => {}
        other => return other,
    }
    let a_dist = a.item.distance_min.unwrap_or(u32::MAX);
    let b_dist = b.item.distance_min.unwrap_or(u32::MAX);
    match a_dist.cmp(&b_dist) {
        Ordering::Equal => {}
        other => return other,
    }
    let a_price = a.item.price_tier.unwrap_or(i32::MAX);
    let b_price = b.item.price_tier.unwrap_or(i32::MAX);
    match a_price.cmp(&b_price) {
        Ordering::Equal => {}
        other => return other,
    }
    a.rand.partial_cmp(&b.rand).unwrap_or(Ordering::Equal)
}

/// Order suggestions for a results view: dietary misfits last, then votes
/// descending, walking minutes ascending, price tier ascending. Full ties
/// break on a uniform random draw made once per item per call, so repeated
/// calls with the same input may disagree only among exact ties. The input
/// is never mutated.
pub fn rank(items: &[EnrichedSuggestion], rng: &mut impl Rng) -> Vec<EnrichedSuggestion> {
    let mut keyed: Vec<Keyed> = items
        .iter()
        .map(|item| Keyed {
            item: item.clone(),
            rand: rng.random::<f64>(),
        })
        .collect();
    keyed.sort_by(compare);
    keyed.into_iter().map(|k| k.item).collect()
}

/// Re-sort an already enriched list by one key, keeping the incoming order
/// between ties. Missing distance or price sorts after every defined value.
pub fn sort_by_key(items: &[EnrichedSuggestion], key: SortKey) -> Vec<EnrichedSuggestion> {
    let mut out = items.to_vec();
    match key {
        SortKey::Votes => out.sort_by(|a, b| b.votes.cmp(&a.votes)),
        SortKey::Distance => out.sort_by_key(|s| s.distance_min.unwrap_or(u32::MAX)),
        SortKey::Price => out.sort_by_key(|s| s.price_tier.unwrap_or(i32::MAX)),
        SortKey::Dietary => out.sort_by_key(|s| s.dietary_fit == Some(false)),
    }
    out
}

/// Draw uniformly from the top `k` ranked entries. `k` is clamped to at
/// least 1 and at most the list length; the draw is independent of the
/// ranking tiebreak.
pub fn lucky_pick<'a>(
    ranked: &'a [EnrichedSuggestion],
    k: usize,
    rng: &mut impl Rng,
) -> Option<&'a EnrichedSuggestion> {
    if ranked.is_empty() {
        return None;
    }
    let pool = ranked.len().min(k.max(1));
    Some(&ranked[rng.random_range(0..pool)])
}
