use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::geo::Coordinate;

/// A business returned by the directory search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub coords: Coordinate,
    /// Directory price marker, e.g. "$$". Its length encodes the tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,
}

impl Business {
    /// Price tier, 1 (cheap) to 4 (expensive), from the marker length.
    pub fn price_tier(&self) -> Option<i32> {
        self.price.as_ref().map(|p| p.chars().count() as i32)
    }
}

/// Business directory lookup near a point.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(
        &self,
        term: &str,
        near: Coordinate,
        limit: u32,
    ) -> Result<Vec<Business>, AppError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<WireBusiness>,
}

#[derive(Deserialize)]
struct WireBusiness {
    id: String,
    name: String,
    coordinates: WireCoordinates,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    categories: Vec<WireCategory>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    review_count: Option<i64>,
}

#[derive(Deserialize)]
struct WireCoordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct WireCategory {
    title: String,
}

/// Client for a Yelp-style business search API.
pub struct PlacesClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PlacesClient {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    async fn search(
        &self,
        term: &str,
        near: Coordinate,
        limit: u32,
    ) -> Result<Vec<Business>, AppError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Search("business search key not configured".to_string()))?;

        let url = format!("{}/businesses/search", self.base_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(key)
            .query(&[
                ("term", term.to_string()),
                ("latitude", near.lat.to_string()),
                ("longitude", near.lng.to_string()),
                ("limit", limit.to_string()),
                ("radius", "2000".to_string()),
                ("sort_by", "distance".to_string()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AppError::Search(format!(
                "business search returned {}",
                resp.status()
            )));
        }

        let parsed: SearchResponse = resp.json().await?;
        Ok(parsed
            .businesses
            .into_iter()
            .map(|b| Business {
                id: b.id,
                name: b.name,
                coords: Coordinate::new(b.coordinates.latitude, b.coordinates.longitude),
                price: b.price,
                categories: b.categories.into_iter().map(|c| c.title).collect(),
                url: b.url,
                rating: b.rating,
                review_count: b.review_count,
            })
            .collect())
    }
}
