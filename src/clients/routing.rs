use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::geo::{self, Coordinate};

/// One-to-many walking-time lookup. The production implementation wraps the
/// routing matrix service; tests substitute fixed or failing sources.
#[async_trait]
pub trait WalkTimeSource: Send + Sync {
    /// Walking minutes from `origin` to each destination, in order. `None`
    /// marks a destination the source could not route.
    async fn walking_minutes(
        &self,
        origin: Coordinate,
        dests: &[Coordinate],
    ) -> Result<Vec<Option<u32>>, AppError>;
}

#[derive(Serialize)]
struct MatrixRequest {
    locations: Vec<[f64; 2]>,
    sources: Vec<usize>,
    destinations: Vec<usize>,
    metrics: Vec<&'static str>,
    units: &'static str,
}

#[derive(Deserialize)]
struct MatrixResponse {
    durations: Vec<Vec<Option<f64>>>,
}

/// Client for the walking-duration matrix service. A missing credential or
/// any upstream failure falls back to the haversine estimate; callers never
/// see an error from this adapter.
pub struct RoutingClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl RoutingClient {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn estimate_all(origin: Coordinate, dests: &[Coordinate]) -> Vec<Option<u32>> {
        dests
            .iter()
            .map(|d| Some(geo::walk_minutes(origin, *d)))
            .collect()
    }

    async fn fetch_matrix(
        &self,
        key: &str,
        origin: Coordinate,
        dests: &[Coordinate],
    ) -> Result<Vec<Option<u32>>, AppError> {
        let mut locations = Vec::with_capacity(dests.len() + 1);
        locations.push([origin.lng, origin.lat]);
        locations.extend(dests.iter().map(|d| [d.lng, d.lat]));

        let body = MatrixRequest {
            locations,
            sources: vec![0],
            destinations: (1..=dests.len()).collect(),
            metrics: vec!["duration"],
            units: "m",
        };

        let url = format!("{}/matrix/foot-walking", self.base_url);
        let resp = self
            .http
            .post(&url)
            .header("Authorization", key)
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AppError::Search(format!(
                "matrix service returned {}",
                resp.status()
            )));
        }

        let matrix: MatrixResponse = resp.json().await?;
        // One source, so only the first durations row matters. A null or
        // missing duration stays None so the caller can fall back per item.
        let row = matrix.durations.into_iter().next().unwrap_or_default();
        Ok((0..dests.len())
            .map(|i| {
                row.get(i)
                    .copied()
                    .flatten()
                    .map(|secs| (secs / 60.0).round() as u32)
            })
            .collect())
    }
}

#[async_trait]
impl WalkTimeSource for RoutingClient {
    async fn walking_minutes(
        &self,
        origin: Coordinate,
        dests: &[Coordinate],
    ) -> Result<Vec<Option<u32>>, AppError> {
        if dests.is_empty() {
            return Ok(Vec::new());
        }
        // No credential configured: estimate locally, no network attempt.
        let Some(key) = self.api_key.as_deref() else {
            return Ok(Self::estimate_all(origin, dests));
        };
        match self.fetch_matrix(key, origin, dests).await {
            Ok(minutes) => Ok(minutes),
            Err(e) => {
                log::warn!("Routing matrix request failed, falling back to estimate: {e}");
                Ok(Self::estimate_all(origin, dests))
            }
        }
    }
}
