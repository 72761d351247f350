use super::common::PhaseBreakdown;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DismissalStats {
    pub caught: u32,
    pub bowled: u32,
    pub lbw: u32,
    pub stumped: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterCareerStats {
    pub matches: u32,
    pub runs: u32,
    pub balls: u32,
    pub outs: u32,
    #[serde(default)]
    pub average: Option<f64>,
    pub strike_rate: f64,
    #[serde(default)]
    pub highest_score: Option<u32>,
}

/// Response of `/batters/{name}/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterProfileResponse {
    pub batter: String,
    pub career: BatterCareerStats,
    #[serde(default)]
    pub phase_performance: PhaseBreakdown,
    #[serde(default)]
    pub dismissals: DismissalStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentMatch {
    pub match_id: i64,
    pub season: String,
    pub venue: String,
    pub runs: u32,
    pub balls: u32,
    pub dismissed: bool,
    pub strike_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentFormSummary {
    pub matches: u32,
    pub runs: u32,
    pub balls: u32,
    pub outs: u32,
    #[serde(default)]
    pub average: Option<f64>,
    pub strike_rate: f64,
}

/// Response of `/batters/{name}/recent-form`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterRecentFormResponse {
    pub batter: String,
    #[serde(default)]
    pub recent_matches: Vec<RecentMatch>,
    pub summary: RecentFormSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonProfile {
    pub season: String,
    pub matches: u32,
    pub runs: u32,
    pub balls: u32,
    pub outs: u32,
    #[serde(default)]
    pub average: Option<f64>,
    pub strike_rate: f64,
    #[serde(default)]
    pub phase_performance: PhaseBreakdown,
    #[serde(default)]
    pub dismissals: DismissalStats,
}

/// Response of `/batters/{name}/profile/seasons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterSeasonProfileResponse {
    pub batter: String,
    #[serde(default)]
    pub seasons: Vec<SeasonProfile>,
    pub total_seasons: u32,
}

impl BatterSeasonProfileResponse {
    /// Season labels in response order.
    pub fn season_labels(&self) -> Vec<String> {
        self.seasons.iter().map(|s| s.season.clone()).collect()
    }
}
