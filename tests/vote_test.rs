//! Store semantics the vote and prepopulation flows rely on: one live vote
//! per member with last-write-wins, tally counting, creation-ordered
//! suggestions, and place-keyed restaurant upserts.

use uuid::Uuid;

use lunchpick::geo::Coordinate;
use lunchpick::models::{tally, NewRestaurant, NewSuggestion, NewVote, SuggestionKind};
use lunchpick::store::DataStore;

mod common;
use common::{no_restrictions, seed_world};

fn new_suggestion(session_id: Uuid, label: &str) -> NewSuggestion {
    NewSuggestion {
        session_id,
        kind: SuggestionKind::Restaurant,
        label: label.to_string(),
        external_ref: None,
        created_by: None,
    }
}

#[tokio::test]
async fn revoting_moves_the_single_live_vote() {
    let world = seed_world(no_restrictions()).await;
    let store = world.store.clone();

    let a = store
        .insert_suggestion(new_suggestion(world.session_id, "a"))
        .await
        .expect("insert a");
    let b = store
        .insert_suggestion(new_suggestion(world.session_id, "b"))
        .await
        .expect("insert b");

    store
        .upsert_vote(NewVote {
            session_id: world.session_id,
            suggestion_id: a.id,
            user_id: world.alice,
        })
        .await
        .expect("first vote");
    store
        .upsert_vote(NewVote {
            session_id: world.session_id,
            suggestion_id: b.id,
            user_id: world.alice,
        })
        .await
        .expect("second vote");

    let votes = store
        .votes_for_session(world.session_id)
        .await
        .expect("fetch votes");
    assert_eq!(votes.len(), 1, "one live vote per member");
    assert_eq!(votes[0].suggestion_id, b.id, "last write wins");

    let counts = tally(&votes);
    assert_eq!(counts.get(&b.id), Some(&1));
    assert_eq!(counts.get(&a.id), None);
}

#[tokio::test]
async fn votes_from_different_members_accumulate() {
    let world = seed_world(no_restrictions()).await;
    let store = world.store.clone();

    let a = store
        .insert_suggestion(new_suggestion(world.session_id, "a"))
        .await
        .expect("insert");

    for _ in 0..3 {
        store
            .upsert_vote(NewVote {
                session_id: world.session_id,
                suggestion_id: a.id,
                user_id: Uuid::new_v4(),
            })
            .await
            .expect("vote");
    }

    let votes = store
        .votes_for_session(world.session_id)
        .await
        .expect("fetch");
    assert_eq!(tally(&votes).get(&a.id), Some(&3));
}

#[tokio::test]
async fn suggestions_come_back_in_creation_order() {
    let world = seed_world(no_restrictions()).await;
    let store = world.store.clone();

    for label in ["first", "second", "third"] {
        store
            .insert_suggestion(new_suggestion(world.session_id, label))
            .await
            .expect("insert");
    }

    let listed = store
        .suggestions_for_session(world.session_id)
        .await
        .expect("list");
    let labels: Vec<_> = listed.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn membership_is_per_team() {
    let world = seed_world(no_restrictions()).await;
    let store = world.store.clone();

    assert!(store
        .is_member(world.team_id, world.alice)
        .await
        .expect("lookup"));
    assert!(!store
        .is_member(world.team_id, world.mallory)
        .await
        .expect("lookup"));
}

#[tokio::test]
async fn restaurant_pool_upserts_by_place() {
    let world = seed_world(no_restrictions()).await;
    let store = world.store.clone();

    let first = vec![
        NewRestaurant {
            name: "Old Name".to_string(),
            place_id: "p1".to_string(),
            coords: Coordinate::new(59.91, 10.75),
            price_tier: Some(2),
            tags: vec!["Pizza".to_string()],
        },
        NewRestaurant {
            name: "Other".to_string(),
            place_id: "p2".to_string(),
            coords: Coordinate::new(59.92, 10.76),
            price_tier: None,
            tags: vec![],
        },
    ];
    store
        .insert_restaurants(world.team_id, &first)
        .await
        .expect("first load");

    let second = vec![NewRestaurant {
        name: "New Name".to_string(),
        place_id: "p1".to_string(),
        coords: Coordinate::new(59.91, 10.75),
        price_tier: Some(3),
        tags: vec!["Pizza".to_string(), "Italian".to_string()],
    }];
    store
        .insert_restaurants(world.team_id, &second)
        .await
        .expect("second load");

    let pool = world.store.restaurants_for_team(world.team_id).await;
    assert_eq!(pool.len(), 2, "same place refreshed, not duplicated");
    let p1 = pool.iter().find(|r| r.place_id == "p1").expect("p1");
    assert_eq!(p1.name, "New Name");
    assert_eq!(p1.price_tier, Some(3));
}
