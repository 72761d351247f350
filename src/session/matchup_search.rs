use tracing::info;

use super::{RESET_SEARCH, ScreenStatus, season_error_message};
use crate::config::Config;
use crate::controllers::{
    MatchupController, MatchupQuery, PlayerSearch, RetryController, RetryOutcome, SeasonOption,
    SeasonSelector, SeasonsController, SeasonsQuery, matchup_controller, seasons_controller,
};
use crate::data_fetcher::api::StatsClient;
use crate::data_fetcher::models::BatterBowlerMatchupResponse;

const NO_DATA_PREFIX: &str = "No matchup data for";

/// Head-to-head search screen.
///
/// Nothing is fetched until [`MatchupSearchSession::analyze`]; after that, edits to
/// either name or the season filter re-fetch. The global season list is loaded once
/// and used to drop a season filter the backend does not know.
pub struct MatchupSearchSession {
    batter_search: PlayerSearch,
    bowler_search: PlayerSearch,
    batter: String,
    bowler: String,
    submitted: bool,
    matchup: MatchupController,
    seasons: SeasonsController,
    selector: SeasonSelector,
    retry: RetryController,
}

impl MatchupSearchSession {
    pub fn new(client: &StatsClient, config: &Config) -> Self {
        let seasons = seasons_controller(client);
        seasons.set_query(Some(SeasonsQuery));
        Self {
            batter_search: PlayerSearch::new(client, config.search_debounce()),
            bowler_search: PlayerSearch::new(client, config.search_debounce()),
            batter: String::new(),
            bowler: String::new(),
            submitted: false,
            matchup: matchup_controller(client),
            seasons,
            selector: SeasonSelector::new(),
            retry: RetryController::new(config.max_retries, RESET_SEARCH),
        }
    }

    /// Typing in the batter box also updates the batter used by the next fetch.
    pub fn set_batter_text(&mut self, text: &str) {
        self.batter_search.set_text(text);
        if self.submitted && self.batter.trim() != text.trim() {
            self.retry.reset();
        }
        self.batter = text.to_string();
        self.sync_query();
    }

    pub fn set_bowler_text(&mut self, text: &str) {
        self.bowler_search.set_text(text);
        if self.submitted && self.bowler.trim() != text.trim() {
            self.retry.reset();
        }
        self.bowler = text.to_string();
        self.sync_query();
    }

    /// Commits both names and starts the head-to-head fetch.
    pub fn analyze(&mut self) {
        self.batter = self.batter.trim().to_string();
        self.bowler = self.bowler.trim().to_string();
        self.submitted = true;
        self.retry.reset();
        info!("Analyzing {} vs {}", self.batter, self.bowler);
        self.sync_query();
    }

    pub fn select_season(&mut self, season: Option<String>) {
        self.selector.select(season);
        self.sync_query();
    }

    /// Drops a season filter missing from the loaded global season list.
    /// Returns true when the filter was dropped.
    pub fn apply_known_seasons(&mut self) -> bool {
        let known = self.available_seasons();
        if self.selector.retain_known(&known) {
            self.sync_query();
            return true;
        }
        false
    }

    pub async fn settle(&mut self) {
        loop {
            self.seasons.settled().await;
            self.matchup.settled().await;
            if !self.apply_known_seasons() {
                break;
            }
        }
    }

    /// Retry action for a failed matchup. Resets the whole search once retries run out.
    pub fn retry(&mut self) -> RetryOutcome {
        let outcome = self.retry.on_retry_or_reset(&self.matchup);
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
        self.batter.clear();
        self.bowler.clear();
        self.submitted = false;
        self.retry.reset();
        self.selector.clear();
        self.sync_query();
    }

    pub fn has_searched(&self) -> bool {
        self.submitted && !self.batter.trim().is_empty() && !self.bowler.trim().is_empty()
    }

    pub fn status(&self) -> ScreenStatus {
        if !self.has_searched() {
            return ScreenStatus::Empty;
        }
        let state = self.matchup.state();
        if state.is_loading {
            return ScreenStatus::Loading;
        }
        if let Some(error) = state.error.as_deref() {
            return ScreenStatus::Failed {
                message: season_error_message(
                    NO_DATA_PREFIX,
                    self.selector.filter(),
                    Some(error),
                    state.error_code.as_deref(),
                ),
                retry_label: self.retry.label(),
            };
        }
        if state.data.is_some() {
            ScreenStatus::Ready
        } else {
            ScreenStatus::Loading
        }
    }

    pub fn result(&self) -> Option<BatterBowlerMatchupResponse> {
        self.matchup.state().data
    }

    pub fn season_options(&self) -> Vec<SeasonOption> {
        self.selector.options(&self.available_seasons())
    }

    pub fn available_seasons(&self) -> Vec<String> {
        self.seasons
            .state()
            .data
            .map(|d| d.seasons)
            .unwrap_or_default()
    }

    pub fn season_filter(&self) -> Option<&str> {
        self.selector.filter()
    }

    pub fn batter_search(&self) -> &PlayerSearch {
        &self.batter_search
    }

    pub fn bowler_search(&self) -> &PlayerSearch {
        &self.bowler_search
    }

    pub fn matchup(&self) -> &MatchupController {
        &self.matchup
    }

    fn sync_query(&self) {
        let query = self.has_searched().then(|| {
            MatchupQuery::new(&self.batter, &self.bowler)
                .with_season(self.selector.filter().map(str::to_string))
        });
        self.matchup.set_query(query);
    }
}
