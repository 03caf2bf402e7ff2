use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A directory hit ready to be stored in a team's restaurant pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub place_id: String,
    pub coords: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_tier: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}
