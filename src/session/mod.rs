//! Screen sessions: the state owned by one screen instance.
//!
//! A session wires player search, resource controllers, the season default and the
//! retry policy together. Dropping a session drops all of it; fetches still in
//! flight finish in the background and their results are discarded.

pub mod batter_profile;
pub mod compare_matchups;
pub mod match_context;
pub mod matchup_search;

pub use batter_profile::BatterProfileSession;
pub use compare_matchups::CompareMatchupsSession;
pub use match_context::MatchContextSession;
pub use matchup_search::MatchupSearchSession;

use crate::constants::error_codes;

/// Reset label on the batter profile and compare screens.
pub const SEARCH_AGAIN: &str = "Search again";
/// Reset label on the matchup screen.
pub const RESET_SEARCH: &str = "Reset search";
/// Label of an unbounded retry.
pub const RETRY: &str = "Retry";

/// What a screen should show for its primary resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenStatus {
    /// Nothing selected yet.
    Empty,
    Loading,
    Failed { message: String, retry_label: String },
    Ready,
}

/// Message for a failed season-scoped query.
///
/// `NOT_FOUND` with an active season filter gets a hint to widen the filter; any
/// other failure keeps the server message.
pub(crate) fn season_error_message(
    prefix: &str,
    season: Option<&str>,
    error: Option<&str>,
    code: Option<&str>,
) -> String {
    match season {
        Some(season) if code == Some(error_codes::NOT_FOUND) => {
            no_data_for_season(prefix, season)
        }
        _ => error.unwrap_or("Something went wrong").to_string(),
    }
}

pub(crate) fn no_data_for_season(prefix: &str, season: &str) -> String {
    format!("{prefix} {season}. Try \"All seasons\" or another year.")
}
