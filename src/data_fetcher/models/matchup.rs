use super::common::PhaseStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupStats {
    pub runs: u32,
    pub balls: u32,
    pub dismissals: u32,
    pub strike_rate: f64,
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEncounter {
    pub match_id: i64,
    pub season: String,
    pub runs: u32,
    pub balls: u32,
    pub dismissed: bool,
}

/// Response of `/matchups/batter/{b}/bowler/{w}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterBowlerMatchupResponse {
    pub batter: String,
    pub bowler: String,
    pub overall: MatchupStats,
    #[serde(default)]
    pub phase_breakdown: Option<BTreeMap<String, PhaseStats>>,
    #[serde(default)]
    pub recent_encounters: Vec<RecentEncounter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchup_without_phase_breakdown() {
        let json = r#"{
            "batter": "V Kohli", "bowler": "JJ Bumrah",
            "overall": {"runs": 140, "balls": 105, "dismissals": 4, "strike_rate": 133.33,
                        "average": 35.0, "confidence_score": 0.8},
            "recent_encounters": []
        }"#;
        let matchup: BatterBowlerMatchupResponse = serde_json::from_str(json).unwrap();

        assert_eq!(matchup.bowler, "JJ Bumrah");
        assert_eq!(matchup.overall.dismissals, 4);
        assert!(matchup.phase_breakdown.is_none());
    }

    #[test]
    fn test_matchup_phase_breakdown_is_keyed_by_phase() {
        let json = r#"{
            "batter": "V Kohli", "bowler": "RA Jadeja",
            "overall": {"runs": 80, "balls": 70, "dismissals": 1, "strike_rate": 114.29},
            "phase_breakdown": {
                "middle": {"runs": 60, "balls": 50, "strike_rate": 120.0, "outs": 1, "average": 60.0}
            },
            "recent_encounters": [{"match_id": 1082591, "season": "2017", "runs": 12, "balls": 9, "dismissed": false}]
        }"#;
        let matchup: BatterBowlerMatchupResponse = serde_json::from_str(json).unwrap();

        let phases = matchup.phase_breakdown.unwrap();
        assert_eq!(phases["middle"].runs, 60);
        assert_eq!(matchup.recent_encounters[0].season, "2017");
    }
}
