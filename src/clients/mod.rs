pub mod auth;
pub mod places;
pub mod routing;

pub use auth::{authenticate, bearer_token, AuthClient, AuthUser, TokenVerifier};
pub use places::{Business, PlaceSearch, PlacesClient};
pub use routing::{RoutingClient, WalkTimeSource};
