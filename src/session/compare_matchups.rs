use tracing::{debug, info};

use super::{SEARCH_AGAIN, ScreenStatus};
use crate::config::Config;
use crate::constants::compare::MAX_BOWLERS;
use crate::controllers::{
    BatchQuery, BatchState, PlayerSearch, RetryController, RetryOutcome,
    batch::MatchupBatchController, matchup_batch_controller,
};
use crate::data_fetcher::api::StatsClient;
use crate::data_fetcher::models::BatterBowlerMatchupResponse;

/// One batter against up to [`MAX_BOWLERS`] bowlers, fetched in parallel.
pub struct CompareMatchupsSession {
    batter_search: PlayerSearch,
    bowler_search: PlayerSearch,
    batter: Option<String>,
    bowlers: Vec<String>,
    batch: MatchupBatchController,
    retry: RetryController,
}

impl CompareMatchupsSession {
    pub fn new(client: &StatsClient, config: &Config) -> Self {
        Self {
            batter_search: PlayerSearch::new(client, config.search_debounce()),
            bowler_search: PlayerSearch::new(client, config.search_debounce()),
            batter: None,
            bowlers: Vec::new(),
            batch: matchup_batch_controller(client),
            retry: RetryController::new(config.max_retries, SEARCH_AGAIN),
        }
    }

    pub fn set_batter_text(&self, text: &str) {
        self.batter_search.set_text(text);
    }

    pub fn set_bowler_text(&self, text: &str) {
        self.bowler_search.set_text(text);
    }

    /// Commits the batter. Retries reset when the batter changes.
    pub fn select_batter(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.clear();
            return;
        }
        self.batter_search.set_text(name);
        if self.batter.as_deref() != Some(name) {
            info!("Comparing matchups for {name}");
            self.batter = Some(name.to_string());
            self.retry.reset();
        }
        self.sync_query();
    }

    /// Adds a bowler. Blank names, duplicates and names beyond the cap are ignored.
    /// Returns true when the bowler was added.
    pub fn add_bowler(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty()
            || self.bowlers.iter().any(|b| b == name)
            || self.bowlers.len() >= MAX_BOWLERS
        {
            debug!("Ignoring bowler {name:?}");
            return false;
        }
        self.bowlers.push(name.to_string());
        self.bowler_search.clear();
        self.retry.reset();
        self.sync_query();
        true
    }

    /// Removes the bowler at `index`; out-of-range indices are ignored.
    pub fn remove_bowler(&mut self, index: usize) -> Option<String> {
        if index >= self.bowlers.len() {
            return None;
        }
        let removed = self.bowlers.remove(index);
        self.retry.reset();
        self.sync_query();
        Some(removed)
    }

    /// Retry action when some matchups failed. Resets the screen once retries run out.
    pub fn retry(&mut self) -> RetryOutcome {
        let outcome = self.retry.on_retry_or_reset(&self.batch);
        if outcome == RetryOutcome::ResetRequested {
            self.clear();
        }
        outcome
    }

    pub fn retry_label(&self) -> String {
        self.retry.label()
    }

    pub fn clear(&mut self) {
        self.batter_search.clear();
        self.bowler_search.clear();
        self.batter = None;
        self.bowlers.clear();
        self.retry.reset();
        self.sync_query();
    }

    pub async fn settle(&self) -> BatchState<BatterBowlerMatchupResponse> {
        self.batch.settled().await
    }

    pub fn state(&self) -> BatchState<BatterBowlerMatchupResponse> {
        self.batch.state()
    }

    /// `Failed` means at least one matchup could not be loaded; the rest still render.
    pub fn status(&self) -> ScreenStatus {
        if self.batter.is_none() {
            return ScreenStatus::Empty;
        }
        let state = self.batch.state();
        if state.is_loading {
            return ScreenStatus::Loading;
        }
        if state.has_errors() && !self.bowlers.is_empty() {
            return ScreenStatus::Failed {
                message: "Some matchups could not be loaded.".to_string(),
                retry_label: self.retry.label(),
            };
        }
        ScreenStatus::Ready
    }

    pub fn batter(&self) -> Option<&str> {
        self.batter.as_deref()
    }

    pub fn bowlers(&self) -> &[String] {
        &self.bowlers
    }

    pub fn can_add_bowler(&self) -> bool {
        self.bowlers.len() < MAX_BOWLERS
    }

    pub fn batter_search(&self) -> &PlayerSearch {
        &self.batter_search
    }

    pub fn bowler_search(&self) -> &PlayerSearch {
        &self.bowler_search
    }

    fn sync_query(&self) {
        let query = self
            .batter
            .as_ref()
            .filter(|_| !self.bowlers.is_empty())
            .map(|batter| BatchQuery::new(batter.clone(), self.bowlers.clone()));
        self.batch.set_query(query);
    }
}
