use serde::{Deserialize, Serialize};

/// Batting numbers for one phase of an innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseStats {
    pub runs: u32,
    pub balls: u32,
    pub strike_rate: f64,
    pub outs: u32,
    #[serde(default)]
    pub average: Option<f64>,
}

/// Powerplay, middle overs and death overs breakdown. A phase the batter
/// never faced is absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseBreakdown {
    #[serde(default)]
    pub powerplay: Option<PhaseStats>,
    #[serde(default)]
    pub middle: Option<PhaseStats>,
    #[serde(default)]
    pub death: Option<PhaseStats>,
}

impl PhaseBreakdown {
    /// Phases that have data, labelled for display.
    pub fn phases(&self) -> Vec<(&'static str, &PhaseStats)> {
        [
            ("Powerplay", self.powerplay.as_ref()),
            ("Middle", self.middle.as_ref()),
            ("Death", self.death.as_ref()),
        ]
        .into_iter()
        .filter_map(|(label, stats)| stats.map(|s| (label, s)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.powerplay.is_none() && self.middle.is_none() && self.death.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonsResponse {
    pub seasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// Error envelope returned by the API on non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_breakdown_with_missing_phases() {
        let json = r#"{"powerplay": {"runs": 40, "balls": 30, "strike_rate": 133.3, "outs": 1}, "death": null}"#;
        let breakdown: PhaseBreakdown = serde_json::from_str(json).unwrap();

        assert!(breakdown.middle.is_none());
        assert!(breakdown.death.is_none());
        let phases = breakdown.phases();
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].0, "Powerplay");
        assert_eq!(phases[0].1.average, None);
        assert!(!breakdown.is_empty());
    }

    #[test]
    fn test_error_envelope_without_details() {
        let json = r#"{"error": {"code": "NOT_FOUND", "message": "Batter 'X' not found"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.error.code.as_deref(), Some("NOT_FOUND"));
        assert_eq!(envelope.error.message.as_deref(), Some("Batter 'X' not found"));
        assert!(envelope.error.details.is_none());
    }

    #[test]
    fn test_error_envelope_rejects_other_shapes() {
        assert!(serde_json::from_str::<ErrorEnvelope>(r#"{"detail": "Not Found"}"#).is_err());
    }
}
