use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::{authenticate, Business};
use crate::enrich::enrich_suggestions;
use crate::errors::AppError;
use crate::models::{tally, ExternalRef, NewSuggestion, Suggestion, SuggestionKind};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateSuggestion {
    pub kind: Option<String>,
    pub label: Option<String>,
}

#[derive(Serialize)]
struct CreateResponse {
    suggestion: Suggestion,
    expanded: Vec<Business>,
}

/// GET /api/sessions/{id}/suggestions - List suggestions enriched with fit, votes, and distance
pub async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    authenticate(&req, state.verifier.as_ref()).await?;

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

    Ok(HttpResponse::Ok().json(enriched))
}

/// POST /api/sessions/{id}/suggestions - Create a suggestion
/// A style suggestion is expanded into concrete candidates near the team
/// home and the nearest one becomes its external reference; expansion
/// failure stores the suggestion unexpanded.
pub async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<CreateSuggestion>,
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

    // Validate
    let body = body.into_inner();
    let (Some(kind_raw), Some(label)) = (body.kind, body.label) else {
        return Err(AppError::MissingFields("kind and label are required"));
    };
    let label = label.trim().to_string();
    if label.is_empty() {
        return Err(AppError::MissingFields("kind and label are required"));
    }
    let kind = SuggestionKind::parse(&kind_raw)
        .ok_or_else(|| AppError::Validation(format!("unknown suggestion kind '{kind_raw}'")))?;

    let mut external_ref = None;
    let mut expanded: Vec<Business> = Vec::new();
    if kind == SuggestionKind::Style {
        let profile = state
            .store
            .team_profile(session.team_id)
            .await?
            .ok_or(AppError::NotFound)?;
        match state.places.search(&label, profile.home, 5).await {
            Ok(businesses) => {
                external_ref = businesses.first().map(|b| ExternalRef {
                    place_id: Some(b.id.clone()),
                    categories: Some(b.categories.clone()),
                    coords: Some(b.coords),
                    price_tier: b.price_tier(),
                    url: b.url.clone(),
                });
                expanded = businesses;
            }
            Err(e) => {
                log::warn!("Style expansion failed, storing unexpanded suggestion: {e}");
            }
        }
    }

    let suggestion = state
        .store
        .insert_suggestion(NewSuggestion {
            session_id,
            kind,
            label,
            external_ref,
            created_by: Some(user.id),
        })
        .await?;

    Ok(HttpResponse::Created().json(CreateResponse {
        suggestion,
        expanded,
    }))
}
