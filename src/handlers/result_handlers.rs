use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::authenticate;
use crate::enrich::enrich_suggestions;
use crate::errors::AppError;
use crate::models::{tally, EnrichedSuggestion};
use crate::ranking::{self, SortKey};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ResultsQuery {
    pub sort: Option<String>,
    pub lucky: Option<usize>,
}

#[derive(Serialize)]
struct ResultsResponse {
    ranked: Vec<EnrichedSuggestion>,
    winner: Option<EnrichedSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lucky_pick: Option<EnrichedSuggestion>,
}

/// GET /api/sessions/{id}/results - Ranked suggestions with winner and optional lucky pick
/// Query params: sort (votes|distance|price|dietary), lucky (top-K draw).
/// `sort` swaps in a single-key view of the same enrichment pass; the winner
/// and any lucky pick always come from the canonical ranking.
pub async fn results(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ResultsQuery>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    authenticate(&req, state.verifier.as_ref()).await?;

    let sort_key = match query.sort.as_deref() {
        None => None,
        Some(raw) => Some(
            SortKey::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("unknown sort key '{raw}'")))?,
        ),
    };

    let session = state
        .store
        .session(session_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let profile = state
        .store
        .team_profile(session.team_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let suggestions = state.store.suggestions_for_session(session_id).await?;
    let votes = state.store.votes_for_session(session_id).await?;
    let counts = tally(&votes);

    let enriched = enrich_suggestions(
        suggestions,
        profile.home,
        &profile.dietary,
        &counts,
        state.walk_times.as_ref(),
    )
    .await;

    let mut rng = rand::rng();
    let canonical = ranking::rank(&enriched, &mut rng);
    let winner = canonical.first().cloned();
    let lucky_pick = query
        .lucky
        .and_then(|k| ranking::lucky_pick(&canonical, k, &mut rng).cloned());
    let ranked = match sort_key {
        None => canonical,
        Some(key) => ranking::sort_by_key(&canonical, key),
    };

    Ok(HttpResponse::Ok().json(ResultsResponse {
        ranked,
        winner,
        lucky_pick,
    }))
}
