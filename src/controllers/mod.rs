//! Async state controllers that sit between user input and the API client.

pub mod batch;
pub mod debounce;
pub mod player_search;
pub mod queries;
pub mod resource;
pub mod retry;
pub mod season_default;

pub use batch::{BatchController, BatchQuery, BatchState, matchup_batch_controller};
pub use debounce::{Debounced, debounce};
pub use player_search::PlayerSearch;
pub use queries::*;
pub use resource::{Query, Refetch, ResourceController, ResourceState};
pub use retry::{RetryController, RetryOutcome};
pub use season_default::{ALL_SEASONS, SeasonOption, SeasonSelector, latest_season};
