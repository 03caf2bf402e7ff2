use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinate;
use crate::models::dietary::DietaryRestrictions;

/// Lifecycle of a lunch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Draft,
    Open,
    Closed,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Draft => "draft",
            SessionStatus::Open => "open",
            SessionStatus::Closed => "closed",
        }
    }

    /// Parse a stored status; anything unrecognized reads as open.
    pub fn parse(s: &str) -> Self {
        match s {
            "draft" => SessionStatus::Draft,
            "closed" => SessionStatus::Closed,
            _ => SessionStatus::Open,
        }
    }
}

/// A team's lunch round for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LunchSession {
    pub id: Uuid,
    pub team_id: Uuid,
    pub status: SessionStatus,
}

/// The slice of team data enrichment needs: where the office is and
/// which dietary restrictions are active across the membership.
#[derive(Debug, Clone)]
pub struct TeamProfile {
    pub team_id: Uuid,
    pub home: Coordinate,
    pub dietary: DietaryRestrictions,
}
