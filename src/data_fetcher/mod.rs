pub mod api;
pub mod models;

pub use api::{ListPlayersParams, MatchupOptions, StatsClient};
