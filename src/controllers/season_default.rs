//! Season filter with a one-shot "latest season" default.

use tracing::debug;

/// Label of the unfiltered option.
pub const ALL_SEASONS: &str = "All seasons";

/// Picks the most recent season label.
///
/// Labels are compared as integers; labels that do not parse rank below every numeric
/// one. On a tie the earliest label wins. Returns `None` for an empty list.
pub fn latest_season(seasons: &[String]) -> Option<&str> {
    let mut best: Option<(Option<i64>, &str)> = None;
    for season in seasons {
        let key = season.trim().parse::<i64>().ok();
        match best {
            Some((best_key, _)) if key <= best_key => {}
            _ => best = Some((key, season.as_str())),
        }
    }
    best.map(|(_, season)| season)
}

/// One entry of the season picker. `value: None` means all seasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonOption {
    pub value: Option<String>,
    pub label: String,
}

/// Season filter state for one screen.
///
/// The first non-empty season list loaded for a subject selects the latest season,
/// unless the user has already chosen. Changing the subject clears the filter and
/// arms the default again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonSelector {
    subject: Option<String>,
    filter: Option<String>,
    default_applied: bool,
}

impl SeasonSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn default_applied(&self) -> bool {
        self.default_applied
    }

    /// Records a new subject. Returns true when it differs from the previous one.
    pub fn on_subject_changed(&mut self, subject: Option<&str>) -> bool {
        let subject = subject.map(str::trim).filter(|s| !s.is_empty());
        if self.subject.as_deref() == subject {
            return false;
        }
        self.subject = subject.map(str::to_string);
        self.filter = None;
        self.default_applied = false;
        true
    }

    /// Applies the default once per subject. Returns true when the filter changed.
    pub fn on_seasons_loaded(&mut self, seasons: &[String]) -> bool {
        if self.default_applied {
            return false;
        }
        let Some(latest) = latest_season(seasons) else {
            return false;
        };
        debug!("Defaulting season filter to {latest}");
        self.filter = Some(latest.to_string());
        self.default_applied = true;
        true
    }

    /// Explicit user choice; `None` means all seasons.
    pub fn select(&mut self, season: Option<String>) {
        self.filter = season.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        self.default_applied = true;
    }

    /// Drops the filter when a non-empty known season list does not contain it.
    /// Returns true when the filter was dropped.
    pub fn retain_known(&mut self, seasons: &[String]) -> bool {
        match &self.filter {
            Some(filter) if !seasons.is_empty() && !seasons.contains(filter) => {
                debug!("Dropping unknown season filter {filter}");
                self.filter = None;
                true
            }
            _ => false,
        }
    }

    /// Picker entries: all seasons, each loaded season, then the active filter if it
    /// is not among them.
    pub fn options(&self, seasons: &[String]) -> Vec<SeasonOption> {
        let mut options = Vec::with_capacity(seasons.len() + 2);
        options.push(SeasonOption {
            value: None,
            label: ALL_SEASONS.to_string(),
        });
        options.extend(seasons.iter().map(|s| SeasonOption {
            value: Some(s.clone()),
            label: s.clone(),
        }));
        if let Some(filter) = &self.filter
            && !seasons.contains(filter)
        {
            options.push(SeasonOption {
                value: Some(filter.clone()),
                label: filter.clone(),
            });
        }
        options
    }

    /// Forgets everything, including the subject.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
