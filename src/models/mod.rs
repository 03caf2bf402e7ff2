pub mod dietary;
pub mod restaurant;
pub mod suggestion;
pub mod team;
pub mod vote;

pub use dietary::DietaryRestrictions;
pub use restaurant::NewRestaurant;
pub use suggestion::{EnrichedSuggestion, ExternalRef, NewSuggestion, Suggestion, SuggestionKind};
pub use team::{LunchSession, SessionStatus, TeamProfile};
pub use vote::{tally, NewVote, Vote};
