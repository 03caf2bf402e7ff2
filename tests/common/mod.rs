//! Shared test infrastructure: an in-memory store seeded with a team and an
//! open session, plus stub collaborators for walk times, business search,
//! and token verification. Everything here runs offline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use lunchpick::clients::{AuthUser, Business, PlaceSearch, TokenVerifier, WalkTimeSource};
use lunchpick::errors::AppError;
use lunchpick::geo::Coordinate;
use lunchpick::models::{DietaryRestrictions, LunchSession, SessionStatus, TeamProfile};
use lunchpick::state::AppState;
use lunchpick::store::MemoryStore;

pub const HOME: Coordinate = Coordinate {
    lat: 59.9139,
    lng: 10.7522,
};

pub const ALICE_TOKEN: &str = "alice-token";
pub const MALLORY_TOKEN: &str = "mallory-token";

// ---------------------------------------------------------------------------
// Walk-time stubs
// ---------------------------------------------------------------------------

/// Answers from a fixed coordinate table; destinations not in the table get
/// `None`. Counts invocations so fan-out behavior can be asserted.
pub struct MappedWalkTimes {
    pub table: Vec<(Coordinate, u32)>,
    pub calls: AtomicUsize,
}

impl MappedWalkTimes {
    pub fn new(table: Vec<(Coordinate, u32)>) -> Self {
        Self {
            table,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalkTimeSource for MappedWalkTimes {
    async fn walking_minutes(
        &self,
        _origin: Coordinate,
        dests: &[Coordinate],
    ) -> Result<Vec<Option<u32>>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(dests
            .iter()
            .map(|d| {
                self.table
                    .iter()
                    .find(|(c, _)| c == d)
                    .map(|(_, minutes)| *minutes)
            })
            .collect())
    }
}

/// Always errors, standing in for a routing outage.
pub struct FailingWalkTimes;

#[async_trait]
impl WalkTimeSource for FailingWalkTimes {
    async fn walking_minutes(
        &self,
        _origin: Coordinate,
        _dests: &[Coordinate],
    ) -> Result<Vec<Option<u32>>, AppError> {
        Err(AppError::Search("simulated routing outage".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Business search stubs
// ---------------------------------------------------------------------------

pub struct StubPlaces {
    pub businesses: Vec<Business>,
}

#[async_trait]
impl PlaceSearch for StubPlaces {
    async fn search(
        &self,
        _term: &str,
        _near: Coordinate,
        limit: u32,
    ) -> Result<Vec<Business>, AppError> {
        Ok(self
            .businesses
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

pub struct FailingPlaces;

#[async_trait]
impl PlaceSearch for FailingPlaces {
    async fn search(
        &self,
        _term: &str,
        _near: Coordinate,
        _limit: u32,
    ) -> Result<Vec<Business>, AppError> {
        Err(AppError::Search("simulated search outage".to_string()))
    }
}

pub fn business(id: &str, name: &str, coords: Coordinate, price: &str, category: &str) -> Business {
    Business {
        id: id.to_string(),
        name: name.to_string(),
        coords,
        price: if price.is_empty() {
            None
        } else {
            Some(price.to_string())
        },
        categories: vec![category.to_string()],
        url: None,
        rating: Some(4.2),
        review_count: Some(120),
    }
}

// ---------------------------------------------------------------------------
// Token verification stub
// ---------------------------------------------------------------------------

/// Maps fixed tokens to users; anything else is rejected.
pub struct StaticVerifier {
    pub users: HashMap<String, AuthUser>,
}

impl StaticVerifier {
    pub fn with_user(token: &str, user_id: Uuid) -> Self {
        let mut users = HashMap::new();
        users.insert(
            token.to_string(),
            AuthUser {
                id: user_id,
                email: None,
            },
        );
        Self { users }
    }

    pub fn add(mut self, token: &str, user_id: Uuid) -> Self {
        self.users.insert(
            token.to_string(),
            AuthUser {
                id: user_id,
                email: None,
            },
        );
        self
    }
}

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError> {
        self.users.get(token).cloned().ok_or(AppError::Unauthorized)
    }
}

// ---------------------------------------------------------------------------
// Seeded state
// ---------------------------------------------------------------------------

pub struct TestWorld {
    pub store: Arc<MemoryStore>,
    pub team_id: Uuid,
    pub session_id: Uuid,
    pub alice: Uuid,
    pub mallory: Uuid,
}

/// A team homed at `HOME` with one member (alice) and an open session.
/// `mallory` holds a valid token but is not on the team.
pub async fn seed_world(dietary: DietaryRestrictions) -> TestWorld {
    let store = Arc::new(MemoryStore::new());
    let team_id = Uuid::new_v4();
    let session_id = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let mallory = Uuid::new_v4();

    store
        .add_team(
            TeamProfile {
                team_id,
                home: HOME,
                dietary,
            },
            &[alice],
        )
        .await;
    store
        .add_session(LunchSession {
            id: session_id,
            team_id,
            status: SessionStatus::Open,
        })
        .await;

    TestWorld {
        store,
        team_id,
        session_id,
        alice,
        mallory,
    }
}

impl TestWorld {
    /// App state wired to this world with the given walk-time and search
    /// stubs. ALICE_TOKEN and MALLORY_TOKEN verify to the matching users.
    pub fn state(
        &self,
        walk_times: Arc<dyn WalkTimeSource>,
        places: Arc<dyn PlaceSearch>,
    ) -> AppState {
        AppState {
            store: self.store.clone(),
            verifier: Arc::new(
                StaticVerifier::with_user(ALICE_TOKEN, self.alice).add(MALLORY_TOKEN, self.mallory),
            ),
            walk_times,
            places,
        }
    }
}

pub fn no_restrictions() -> DietaryRestrictions {
    DietaryRestrictions::default()
}

pub fn restrictions(keys: &[&str]) -> DietaryRestrictions {
    DietaryRestrictions(keys.iter().map(|k| (k.to_string(), true)).collect())
}
