use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response of `/matches/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInfoResponse {
    pub match_id: i64,
    pub season: String,
    pub venue: String,
    #[serde(default)]
    pub teams: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub toss: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_info_minimal() {
        let json = r#"{"match_id": 335982, "season": "2008", "venue": "M Chinnaswamy Stadium"}"#;
        let info: MatchInfoResponse = serde_json::from_str(json).unwrap();

        assert_eq!(info.match_id, 335982);
        assert!(info.teams.is_none());
        assert!(info.toss.is_none());
        assert!(info.date.is_none());
    }
}
