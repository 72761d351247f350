use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlayerResponse {
    pub name: String,
}

/// Response of `/players/search`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PlayerSearchResponse {
    #[serde(default)]
    pub players: Vec<PlayerResponse>,
}

/// Response of `/players`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlayerListResponse {
    pub players: Vec<String>,
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_ignores_extra_fields() {
        let json = r#"{"players": [{"name": "V Kohli", "matches": 237}, {"name": "Virat Kohli", "matches": 15}]}"#;
        let response: PlayerSearchResponse = serde_json::from_str(json).unwrap();

        let names: Vec<_> = response.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["V Kohli", "Virat Kohli"]);
    }

    #[test]
    fn test_list_response() {
        let json = r#"{"players": ["MS Dhoni", "V Kohli"], "total": 160, "limit": 2, "offset": 0}"#;
        let response: PlayerListResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.players.len(), 2);
        assert_eq!(response.total, 160);
    }
}
