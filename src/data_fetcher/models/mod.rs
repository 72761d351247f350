pub mod batter;
pub mod common;
pub mod matches;
pub mod matchup;
pub mod players;

pub use batter::{
    BatterCareerStats, BatterProfileResponse, BatterRecentFormResponse,
    BatterSeasonProfileResponse, DismissalStats, RecentFormSummary, RecentMatch, SeasonProfile,
};
pub use common::{
    ErrorBody, ErrorEnvelope, HealthResponse, PhaseBreakdown, PhaseStats, SeasonsResponse,
};
pub use matches::MatchInfoResponse;
pub use matchup::{BatterBowlerMatchupResponse, MatchupStats, RecentEncounter};
pub use players::{PlayerListResponse, PlayerResponse, PlayerSearchResponse};
