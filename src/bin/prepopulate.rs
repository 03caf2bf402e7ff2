//! Seed a team's restaurant pool from the business directory.
//!
//! Reads TEAM_ID, TEAM_LAT, TEAM_LNG plus the usual DATABASE_URL and
//! PLACES_* variables, searches for restaurants near the team home, and
//! upserts the hits. Fails loudly; meant to be run by hand.

use std::env;

use uuid::Uuid;

use lunchpick::clients::{PlaceSearch, PlacesClient};
use lunchpick::db;
use lunchpick::geo::Coordinate;
use lunchpick::models::NewRestaurant;
use lunchpick::store::{DataStore, PgStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let team_id: Uuid = env::var("TEAM_ID")
        .expect("TEAM_ID must be set")
        .parse()
        .expect("TEAM_ID must be a UUID");
    let lat: f64 = env::var("TEAM_LAT")
        .expect("TEAM_LAT must be set")
        .parse()
        .expect("TEAM_LAT must be a number");
    let lng: f64 = env::var("TEAM_LNG")
        .expect("TEAM_LNG must be set")
        .parse()
        .expect("TEAM_LNG must be a number");
    let home = Coordinate::new(lat, lng);

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let places_api_key = env::var("PLACES_API_KEY").ok().filter(|k| !k.is_empty());
    let places_base_url = env::var("PLACES_BASE_URL")
        .unwrap_or_else(|_| "https://api.yelp.com/v3".to_string());

    let pool = db::init_pool(&database_url).await;
    db::run_migrations(&pool).await;
    let store = PgStore::new(pool);

    let places = PlacesClient::new(places_api_key, places_base_url);
    let businesses = places
        .search("restaurants", home, 20)
        .await
        .expect("Business search failed");
    log::info!("Search returned {} businesses", businesses.len());

    let rows: Vec<NewRestaurant> = businesses
        .iter()
        .map(|b| NewRestaurant {
            name: b.name.clone(),
            place_id: b.id.clone(),
            coords: b.coords,
            price_tier: b.price_tier(),
            tags: b.categories.clone(),
        })
        .collect();

    let written = store
        .insert_restaurants(team_id, &rows)
        .await
        .expect("Failed to store restaurants");
    log::info!("Stored {written} restaurants for team {team_id}");
}
