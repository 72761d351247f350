use crate::data_fetcher::models::{
    BatterBowlerMatchupResponse, BatterCareerStats, BatterProfileResponse,
    BatterRecentFormResponse, BatterSeasonProfileResponse, DismissalStats, MatchInfoResponse,
    MatchupStats, PhaseBreakdown, PhaseStats, PlayerResponse, PlayerSearchResponse,
    RecentEncounter, RecentFormSummary, RecentMatch, SeasonProfile, SeasonsResponse,
};
use std::collections::BTreeMap;

/// Test utilities for creating mock API payloads
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a career profile with a powerplay and death breakdown
    pub fn profile(batter: &str) -> BatterProfileResponse {
        BatterProfileResponse {
            batter: batter.to_string(),
            career: BatterCareerStats {
                matches: 237,
                runs: 7263,
                balls: 5563,
                outs: 199,
                average: Some(36.5),
                strike_rate: 130.56,
                highest_score: Some(113),
            },
            phase_performance: PhaseBreakdown {
                powerplay: Some(Self::phase(2100, 1700, 60)),
                middle: None,
                death: Some(Self::phase(900, 560, 40)),
            },
            dismissals: DismissalStats {
                caught: 120,
                bowled: 30,
                lbw: 10,
                stumped: 4,
            },
        }
    }

    /// Creates one season row per label, in the given order
    pub fn season_profiles(batter: &str, seasons: &[&str]) -> BatterSeasonProfileResponse {
        let seasons: Vec<SeasonProfile> = seasons
            .iter()
            .map(|season| SeasonProfile {
                season: season.to_string(),
                matches: 14,
                runs: 400,
                balls: 300,
                outs: 10,
                average: Some(40.0),
                strike_rate: 133.33,
                phase_performance: PhaseBreakdown::default(),
                dismissals: DismissalStats::default(),
            })
            .collect();
        BatterSeasonProfileResponse {
            batter: batter.to_string(),
            total_seasons: seasons.len() as u32,
            seasons,
        }
    }

    /// Creates a five-match recent form summary
    pub fn recent_form(batter: &str) -> BatterRecentFormResponse {
        let recent_matches = (0..5)
            .map(|i| RecentMatch {
                match_id: 1_082_600 + i,
                season: "2017".to_string(),
                venue: "M Chinnaswamy Stadium".to_string(),
                runs: 20 + i as u32,
                balls: 15,
                dismissed: i % 2 == 0,
                strike_rate: 140.0,
            })
            .collect();
        BatterRecentFormResponse {
            batter: batter.to_string(),
            recent_matches,
            summary: RecentFormSummary {
                matches: 5,
                runs: 110,
                balls: 75,
                outs: 3,
                average: Some(36.67),
                strike_rate: 146.67,
            },
        }
    }

    /// Creates a head-to-head record with `runs` in the overall line
    pub fn matchup(batter: &str, bowler: &str, runs: u32) -> BatterBowlerMatchupResponse {
        let mut phases = BTreeMap::new();
        phases.insert("powerplay".to_string(), Self::phase(runs / 2, 40, 1));
        BatterBowlerMatchupResponse {
            batter: batter.to_string(),
            bowler: bowler.to_string(),
            overall: MatchupStats {
                runs,
                balls: 105,
                dismissals: 4,
                strike_rate: 133.33,
                average: Some(35.0),
                confidence_score: Some(80.0),
            },
            phase_breakdown: Some(phases),
            recent_encounters: vec![RecentEncounter {
                match_id: 1_082_591,
                season: "2017".to_string(),
                runs: 12,
                balls: 9,
                dismissed: false,
            }],
        }
    }

    pub fn search_results(names: &[&str]) -> PlayerSearchResponse {
        PlayerSearchResponse {
            players: names
                .iter()
                .map(|name| PlayerResponse {
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    pub fn seasons(labels: &[&str]) -> SeasonsResponse {
        SeasonsResponse {
            seasons: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Creates match metadata with teams, date and toss present
    pub fn match_info(match_id: i64) -> MatchInfoResponse {
        let teams = BTreeMap::from([
            ("team1".to_string(), "Kolkata Knight Riders".to_string()),
            ("team2".to_string(), "Royal Challengers Bangalore".to_string()),
        ]);
        let toss = BTreeMap::from([
            ("winner".to_string(), "Royal Challengers Bangalore".to_string()),
            ("decision".to_string(), "field".to_string()),
        ]);
        MatchInfoResponse {
            match_id,
            season: "2008".to_string(),
            venue: "M Chinnaswamy Stadium".to_string(),
            teams: Some(teams),
            date: Some("2008-04-18".to_string()),
            toss: Some(toss),
        }
    }

    /// Creates the `{error: {code, message}}` body the API returns on failure
    pub fn error_body(code: &str, message: &str) -> serde_json::Value {
        serde_json::json!({ "error": { "code": code, "message": message } })
    }

    fn phase(runs: u32, balls: u32, outs: u32) -> PhaseStats {
        PhaseStats {
            runs,
            balls,
            strike_rate: if balls == 0 {
                0.0
            } else {
                runs as f64 * 100.0 / balls as f64
            },
            outs,
            average: (outs > 0).then(|| runs as f64 / outs as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_to_api_shape() {
        let json = serde_json::to_value(TestDataBuilder::profile("V Kohli")).unwrap();
        assert_eq!(json["batter"], "V Kohli");
        assert_eq!(json["career"]["highest_score"], 113);
        assert!(json["phase_performance"]["middle"].is_null());
    }

    #[test]
    fn test_season_profiles_keep_order() {
        let response = TestDataBuilder::season_profiles("V Kohli", &["2021", "2023", "2022"]);
        assert_eq!(response.season_labels(), vec!["2021", "2023", "2022"]);
        assert_eq!(response.total_seasons, 3);
    }

    #[test]
    fn test_error_body_parses_as_envelope() {
        let body = TestDataBuilder::error_body("NOT_FOUND", "Batter 'X' not found");
        let envelope: crate::data_fetcher::models::ErrorEnvelope =
            serde_json::from_value(body).unwrap();
        assert_eq!(envelope.error.code.as_deref(), Some("NOT_FOUND"));
    }
}
