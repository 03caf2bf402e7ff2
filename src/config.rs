use std::env;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Routing service credential. Absent means every walk time comes from
    /// the haversine estimator and no routing request is ever made.
    pub routing_api_key: Option<String>,
    pub routing_base_url: String,
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub auth_base_url: String,
    pub auth_api_key: String,
}

impl AppConfig {
    /// Read configuration from the environment. Panics when a required
    /// variable is missing; call after `dotenvy::dotenv()`.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            routing_api_key: env::var("ROUTING_API_KEY").ok().filter(|k| !k.is_empty()),
            routing_base_url: env::var("ROUTING_BASE_URL")
                .unwrap_or_else(|_| "https://api.openrouteservice.org/v2".to_string()),
            places_api_key: env::var("PLACES_API_KEY").ok().filter(|k| !k.is_empty()),
            places_base_url: env::var("PLACES_BASE_URL")
                .unwrap_or_else(|_| "https://api.yelp.com/v3".to_string()),
            auth_base_url: env::var("AUTH_BASE_URL").expect("AUTH_BASE_URL must be set"),
            auth_api_key: env::var("AUTH_API_KEY").expect("AUTH_API_KEY must be set"),
        }
    }
}
