use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    LunchSession, NewRestaurant, NewSuggestion, NewVote, Suggestion, TeamProfile, Vote,
};
use crate::store::DataStore;

#[derive(Default)]
struct Inner {
    sessions: HashMap<Uuid, LunchSession>,
    teams: HashMap<Uuid, TeamProfile>,
    members: HashMap<Uuid, HashSet<Uuid>>,
    suggestions: HashMap<Uuid, Vec<Suggestion>>,
    votes: HashMap<Uuid, Vec<Vote>>,
    restaurants: HashMap<Uuid, Vec<NewRestaurant>>,
}

/// In-memory store with the same semantics as the Postgres one, including
/// last-write-wins vote upserts and creation-ordered suggestion lists.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_team(&self, profile: TeamProfile, members: &[Uuid]) {
        let mut inner = self.inner.write().await;
        inner
            .members
            .insert(profile.team_id, members.iter().copied().collect());
        inner.teams.insert(profile.team_id, profile);
    }

    pub async fn add_session(&self, session: LunchSession) {
        self.inner
            .write()
            .await
            .sessions
            .insert(session.id, session);
    }

    pub async fn restaurants_for_team(&self, team_id: Uuid) -> Vec<NewRestaurant> {
        self.inner
            .read()
            .await
            .restaurants
            .get(&team_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn session(&self, id: Uuid) -> Result<Option<LunchSession>, AppError> {
        Ok(self.inner.read().await.sessions.get(&id).cloned())
    }

    async fn team_profile(&self, team_id: Uuid) -> Result<Option<TeamProfile>, AppError> {
        Ok(self.inner.read().await.teams.get(&team_id).cloned())
    }

    async fn is_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .members
            .get(&team_id)
            .is_some_and(|m| m.contains(&user_id)))
    }

    async fn suggestions_for_session(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<Suggestion>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .suggestions
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_suggestion(&self, new: NewSuggestion) -> Result<Suggestion, AppError> {
        let suggestion = Suggestion {
            id: Uuid::new_v4(),
            session_id: new.session_id,
            kind: new.kind,
            label: new.label,
            external_ref: new.external_ref,
            created_by: new.created_by,
            created_at: Utc::now(),
        };
        self.inner
            .write()
            .await
            .suggestions
            .entry(new.session_id)
            .or_default()
            .push(suggestion.clone());
        Ok(suggestion)
    }

    async fn votes_for_session(&self, session_id: Uuid) -> Result<Vec<Vote>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .votes
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_vote(&self, new: NewVote) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let votes = inner.votes.entry(new.session_id).or_default();
        let vote = Vote {
            session_id: new.session_id,
            suggestion_id: new.suggestion_id,
            user_id: new.user_id,
            weight: 1,
        };
        match votes.iter_mut().find(|v| v.user_id == new.user_id) {
            Some(existing) => *existing = vote,
            None => votes.push(vote),
        }
        Ok(())
    }

    async fn insert_restaurants(
        &self,
        team_id: Uuid,
        rows: &[NewRestaurant],
    ) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;
        let pool = inner.restaurants.entry(team_id).or_default();
        for row in rows {
            match pool.iter_mut().find(|r| r.place_id == row.place_id) {
                Some(existing) => *existing = row.clone(),
                None => pool.push(row.clone()),
            }
        }
        Ok(rows.len() as u64)
    }
}
