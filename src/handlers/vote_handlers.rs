use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::clients::authenticate;
use crate::errors::AppError;
use crate::models::{tally, NewVote, SessionStatus};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CastVote {
    pub suggestion_id: Option<Uuid>,
}

/// GET /api/sessions/{id}/votes - Raw votes plus the per-suggestion tally (no auth)
pub async fn list(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    state
        .store
        .session(session_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let votes = state.store.votes_for_session(session_id).await?;
    let counts = tally(&votes);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "votes": votes,
        "tally": counts,
    })))
}

/// POST /api/sessions/{id}/votes - Cast or move the caller's vote
/// One live vote per member per session; voting again replaces it.
pub async fn cast(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<CastVote>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let user = authenticate(&req, state.verifier.as_ref()).await?;

    let session = state
        .store
        .session(session_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !state.store.is_member(session.team_id, user.id).await? {
        return Err(AppError::Forbidden);
    }
    if session.status != SessionStatus::Open {
        return Err(AppError::Validation("session is not open for voting".to_string()));
    }

    let Some(suggestion_id) = body.into_inner().suggestion_id else {
        return Err(AppError::MissingFields("suggestion_id is required"));
    };

    state
        .store
        .upsert_vote(NewVote {
            session_id,
            suggestion_id,
            user_id: user.id,
        })
        .await?;

    let votes = state.store.votes_for_session(session_id).await?;
    let counts = tally(&votes);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": user.id,
        "suggestion_id": suggestion_id,
        "tally": counts,
    })))
}
