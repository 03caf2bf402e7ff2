use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinate;

/// What a team member proposed: a concrete place, or a cuisine style
/// that gets expanded into concrete candidates on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Restaurant,
    Style,
}

impl SuggestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionKind::Restaurant => "restaurant",
            SuggestionKind::Style => "style",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "restaurant" => Some(SuggestionKind::Restaurant),
            "style" => Some(SuggestionKind::Style),
            _ => None,
        }
    }
}

/// Data captured from the business directory when a suggestion was
/// created or expanded. All fields are best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinate>,
    /// 1 (cheap) to 4 (expensive), when the directory reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_tier: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A stored suggestion, exactly as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub session_id: Uuid,
    pub kind: SuggestionKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<ExternalRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a suggestion.
#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub session_id: Uuid,
    pub kind: SuggestionKind,
    pub label: String,
    pub external_ref: Option<ExternalRef>,
    pub created_by: Option<Uuid>,
}

/// A suggestion plus the per-request fields the ranking engine reads.
/// Computed fresh on every fetch, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedSuggestion {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    /// False when a category tag names an active team restriction.
    /// Absent means nothing known against it; ranking treats that as fit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_fit: Option<bool>,
    #[serde(default)]
    pub votes: i64,
    /// Walking minutes from the team's home point, when resolvable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_tier: Option<i32>,
}

impl EnrichedSuggestion {
    /// Wrap a stored suggestion with no computed data yet.
    pub fn bare(suggestion: Suggestion) -> Self {
        Self {
            suggestion,
            dietary_fit: None,
            votes: 0,
            distance_min: None,
            price_tier: None,
        }
    }
}
