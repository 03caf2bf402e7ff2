pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    LunchSession, NewRestaurant, NewSuggestion, NewVote, Suggestion, TeamProfile, Vote,
};

/// Persistence seam. Production talks to Postgres; the test suite runs
/// against the in-memory implementation.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn session(&self, id: Uuid) -> Result<Option<LunchSession>, AppError>;

    /// Home location plus the union of active dietary restrictions across
    /// the team's members.
    async fn team_profile(&self, team_id: Uuid) -> Result<Option<TeamProfile>, AppError>;

    async fn is_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, AppError>;

    /// Suggestions in creation order.
    async fn suggestions_for_session(&self, session_id: Uuid)
        -> Result<Vec<Suggestion>, AppError>;

    async fn insert_suggestion(&self, new: NewSuggestion) -> Result<Suggestion, AppError>;

    async fn votes_for_session(&self, session_id: Uuid) -> Result<Vec<Vote>, AppError>;

    /// One live vote per (session, user); last write wins.
    async fn upsert_vote(&self, new: NewVote) -> Result<(), AppError>;

    /// Bulk-load directory hits into a team's restaurant pool. Returns the
    /// number of rows written.
    async fn insert_restaurants(
        &self,
        team_id: Uuid,
        rows: &[NewRestaurant],
    ) -> Result<u64, AppError>;
}
