use crate::clients::WalkTimeSource;
use crate::geo::{self, Coordinate};

/// Resolve walking minutes between two points. The routing source is asked
/// first; when it errors or cannot route the pair, the haversine estimate
/// answers instead. The tiers are never reordered.
pub async fn resolve_walk_minutes(
    source: &dyn WalkTimeSource,
    origin: Coordinate,
    dest: Coordinate,
) -> Option<u32> {
    match source.walking_minutes(origin, &[dest]).await {
        Ok(minutes) => match minutes.first().copied().flatten() {
            Some(m) => Some(m),
            None => Some(geo::walk_minutes(origin, dest)),
        },
        Err(e) => {
            log::warn!("Walk time lookup failed, using estimate: {e}");
            Some(geo::walk_minutes(origin, dest))
        }
    }
}
