use actix_web::http::header;
use actix_web::HttpRequest;
use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;

/// Identity attached to a verified request.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolves a bearer token to a user. Any failure is `Unauthorized`.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError>;
}

/// Client for the hosted auth provider's user-lookup endpoint.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TokenVerifier for AuthClient {
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Auth provider unreachable: {e}");
                AppError::Unauthorized
            })?;
        if !resp.status().is_success() {
            return Err(AppError::Unauthorized);
        }
        resp.json::<AuthUser>().await.map_err(|e| {
            log::warn!("Auth provider returned an unreadable user: {e}");
            AppError::Unauthorized
        })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    value
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

/// Authenticate a request: parse the bearer header, then verify the token.
pub async fn authenticate(
    req: &HttpRequest,
    verifier: &dyn TokenVerifier,
) -> Result<AuthUser, AppError> {
    let token = bearer_token(req)?;
    verifier.verify(token).await
}
