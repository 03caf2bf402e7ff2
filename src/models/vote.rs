use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One member's live vote in a session. At most one row exists per
/// (session, user); voting again replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub session_id: Uuid,
    pub suggestion_id: Uuid,
    pub user_id: Uuid,
    pub weight: i32,
}

/// Input for casting or moving a vote.
#[derive(Debug, Clone)]
pub struct NewVote {
    pub session_id: Uuid,
    pub suggestion_id: Uuid,
    pub user_id: Uuid,
}

/// Count votes per suggestion.
pub fn tally(votes: &[Vote]) -> HashMap<Uuid, i64> {
    let mut counts: HashMap<Uuid, i64> = HashMap::new();
    for vote in votes {
        *counts.entry(vote.suggestion_id).or_insert(0) += 1;
    }
    counts
}
