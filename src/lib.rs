pub mod clients;
pub mod config;
pub mod db;
pub mod distance;
pub mod enrich;
pub mod errors;
pub mod geo;
pub mod handlers;
pub mod models;
pub mod ranking;
pub mod state;
pub mod store;
