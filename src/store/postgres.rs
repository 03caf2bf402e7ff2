use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::geo::Coordinate;
use crate::models::{
    DietaryRestrictions, ExternalRef, LunchSession, NewRestaurant, NewSuggestion, NewVote,
    SessionStatus, Suggestion, SuggestionKind, TeamProfile, Vote,
};
use crate::store::DataStore;

/// Postgres-backed store.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_external_ref(value: Option<serde_json::Value>) -> Option<ExternalRef> {
    value.and_then(|v| match serde_json::from_value(v) {
        Ok(r) => Some(r),
        Err(e) => {
            log::warn!("Skipping unreadable external_ref: {e}");
            None
        }
    })
}

#[async_trait]
impl DataStore for PgStore {
    async fn session(&self, id: Uuid) -> Result<Option<LunchSession>, AppError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: Uuid,
            team_id: Uuid,
            status: String,
        }

        let row = sqlx::query_as::<_, Row>(
            "SELECT id, team_id, status FROM lunch_sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| LunchSession {
            id: r.id,
            team_id: r.team_id,
            status: SessionStatus::parse(&r.status),
        }))
    }

    async fn team_profile(&self, team_id: Uuid) -> Result<Option<TeamProfile>, AppError> {
        #[derive(sqlx::FromRow)]
        struct TeamRow {
            id: Uuid,
            home_lat: f64,
            home_lng: f64,
        }

        let team = sqlx::query_as::<_, TeamRow>(
            "SELECT id, home_lat, home_lng FROM teams WHERE id = $1",
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(team) = team else {
            return Ok(None);
        };

        #[derive(sqlx::FromRow)]
        struct MemberRow {
            dietary_restrictions: serde_json::Value,
        }

        let members = sqlx::query_as::<_, MemberRow>(
            "SELECT dietary_restrictions FROM team_members WHERE team_id = $1",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        let mut dietary = DietaryRestrictions::default();
        for member in members {
            match serde_json::from_value::<DietaryRestrictions>(member.dietary_restrictions) {
                Ok(set) => dietary.merge(&set),
                Err(e) => log::warn!("Skipping unreadable dietary settings: {e}"),
            }
        }

        Ok(Some(TeamProfile {
            team_id: team.id,
            home: Coordinate::new(team.home_lat, team.home_lng),
            dietary,
        }))
    }

    async fn is_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM team_members WHERE team_id = $1 AND user_id = $2)",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn suggestions_for_session(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<Suggestion>, AppError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: Uuid,
            session_id: Uuid,
            kind: String,
            label: String,
            external_ref: Option<serde_json::Value>,
            created_by: Option<Uuid>,
            created_at: DateTime<Utc>,
        }

        let rows = sqlx::query_as::<_, Row>(
            "SELECT id, session_id, kind, label, external_ref, created_by, created_at \
             FROM suggestions \
             WHERE session_id = $1 \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Suggestion {
                id: r.id,
                session_id: r.session_id,
                kind: SuggestionKind::parse(&r.kind).unwrap_or(SuggestionKind::Restaurant),
                label: r.label,
                external_ref: decode_external_ref(r.external_ref),
                created_by: r.created_by,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn insert_suggestion(&self, new: NewSuggestion) -> Result<Suggestion, AppError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: Uuid,
            created_at: DateTime<Utc>,
        }

        let row = sqlx::query_as::<_, Row>(
            "INSERT INTO suggestions (session_id, kind, label, external_ref, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, created_at",
        )
        .bind(new.session_id)
        .bind(new.kind.as_str())
        .bind(&new.label)
        .bind(new.external_ref.as_ref().map(Json))
        .bind(new.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(Suggestion {
            id: row.id,
            session_id: new.session_id,
            kind: new.kind,
            label: new.label,
            external_ref: new.external_ref,
            created_by: new.created_by,
            created_at: row.created_at,
        })
    }

    async fn votes_for_session(&self, session_id: Uuid) -> Result<Vec<Vote>, AppError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            session_id: Uuid,
            suggestion_id: Uuid,
            user_id: Uuid,
            weight: i32,
        }

        let rows = sqlx::query_as::<_, Row>(
            "SELECT session_id, suggestion_id, user_id, weight \
             FROM votes WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Vote {
                session_id: r.session_id,
                suggestion_id: r.suggestion_id,
                user_id: r.user_id,
                weight: r.weight,
            })
            .collect())
    }

    async fn upsert_vote(&self, new: NewVote) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO votes (session_id, suggestion_id, user_id, weight) \
             VALUES ($1, $2, $3, 1) \
             ON CONFLICT (session_id, user_id) \
             DO UPDATE SET suggestion_id = EXCLUDED.suggestion_id, updated_at = now()",
        )
        .bind(new.session_id)
        .bind(new.suggestion_id)
        .bind(new.user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_restaurants(
        &self,
        team_id: Uuid,
        rows: &[NewRestaurant],
    ) -> Result<u64, AppError> {
        let mut written = 0u64;
        let mut tx = self.pool.begin().await?;
        for row in rows {
            let result = sqlx::query(
                "INSERT INTO restaurants (team_id, name, place_id, lat, lng, price_tier, tags) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) \
                 ON CONFLICT (team_id, place_id) \
                 DO UPDATE SET name = EXCLUDED.name, \
                               price_tier = EXCLUDED.price_tier, \
                               tags = EXCLUDED.tags",
            )
            .bind(team_id)
            .bind(&row.name)
            .bind(&row.place_id)
            .bind(row.coords.lat)
            .bind(row.coords.lng)
            .bind(row.price_tier)
            .bind(&row.tags)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }
        tx.commit().await?;
        Ok(written)
    }
}
