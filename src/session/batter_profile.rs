use tracing::info;

use super::{ScreenStatus, SEARCH_AGAIN, no_data_for_season, season_error_message};
use crate::config::Config;
use crate::constants::query_defaults::RECENT_FORM_MATCHES;
use crate::controllers::{
    PlayerSearch, ProfileController, ProfileQuery, RecentFormController, RecentFormQuery,
    RetryController, RetryOutcome, SeasonOption, SeasonProfileController, SeasonProfileQuery,
    SeasonSelector, profile_controller, recent_form_controller, season_profile_controller,
};
use crate::data_fetcher::api::StatsClient;
use crate::data_fetcher::models::SeasonProfile;

const NO_DATA_PREFIX: &str = "No data for";

/// Batter profile screen: career stats, per-season breakdown and recent form.
///
/// Selecting a batter fetches all three resources. The first season list that loads
/// selects the latest season as the filter, unless the user picked one already.
pub struct BatterProfileSession {
    search: PlayerSearch,
    selected: Option<String>,
    profile: ProfileController,
    seasons: SeasonProfileController,
    recent_form: RecentFormController,
    selector: SeasonSelector,
    retry: RetryController,
}

impl BatterProfileSession {
    pub fn new(client: &StatsClient, config: &Config) -> Self {
        Self {
            search: PlayerSearch::new(client, config.search_debounce()),
            selected: None,
            profile: profile_controller(client),
            seasons: season_profile_controller(client),
            recent_form: recent_form_controller(client),
            selector: SeasonSelector::new(),
            retry: RetryController::new(config.max_retries, SEARCH_AGAIN),
        }
    }

    /// Updates the search box.
    pub fn set_query_text(&self, text: &str) {
        self.search.set_text(text);
    }

    /// Commits a batter (usually a picked suggestion). A blank name clears the screen.
    pub fn select_batter(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.clear();
            return;
        }
        self.search.set_text(name);
        if self.selector.on_subject_changed(Some(name)) {
            info!("Selected batter {name}");
            self.retry.reset();
        }
        self.selected = Some(name.to_string());
        self.sync_queries();
    }

    /// Explicit season choice; `None` is "All seasons".
    pub fn select_season(&mut self, season: Option<String>) {
        self.selector.select(season);
        self.sync_queries();
    }

    /// Applies the latest-season default if the unfiltered season list has loaded.
    /// Returns true when the filter changed.
    pub fn apply_season_default(&mut self) -> bool {
        let state = self.seasons.state();
        if state.is_loading {
            return false;
        }
        let Some(data) = state.data else {
            return false;
        };
        if self.selector.on_seasons_loaded(&data.season_labels()) {
            self.sync_queries();
            return true;
        }
        false
    }

    /// Waits for every resource to settle, applying the season default on the way.
    pub async fn settle(&mut self) {
        loop {
            self.profile.settled().await;
            self.seasons.settled().await;
            self.recent_form.settled().await;
            if !self.apply_season_default() {
                break;
            }
        }
    }

    /// Retry action for a failed profile. Resets the screen once retries run out.
    pub fn retry(&mut self) -> RetryOutcome {
        let outcome = self.retry.on_retry_or_reset(&self.profile);
        if outcome == RetryOutcome::ResetRequested {
            self.clear();
        }
        outcome
    }

    pub fn retry_label(&self) -> String {
        self.retry.label()
    }

    /// Back to the empty search screen.
    pub fn clear(&mut self) {
        self.search.clear();
        self.selected = None;
        self.selector.clear();
        self.retry.reset();
        self.sync_queries();
    }

    pub fn status(&self) -> ScreenStatus {
        if self.selected.is_none() {
            return ScreenStatus::Empty;
        }
        let profile = self.profile.state();
        if profile.data.is_some() {
            return ScreenStatus::Ready;
        }
        match profile.error {
            Some(message) => ScreenStatus::Failed {
                message,
                retry_label: self.retry.label(),
            },
            None => ScreenStatus::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.profile.state().is_loading
            || self.seasons.state().is_loading
            || self.recent_form.state().is_loading
    }

    /// Season picker entries for the loaded season list.
    pub fn season_options(&self) -> Vec<SeasonOption> {
        self.selector.options(&self.season_labels())
    }

    /// Season rows to show, narrowed to the active filter.
    pub fn season_rows(&self) -> Vec<SeasonProfile> {
        let seasons = self
            .seasons
            .state()
            .data
            .map(|d| d.seasons)
            .unwrap_or_default();
        match self.selector.filter() {
            Some(filter) => seasons.into_iter().filter(|s| s.season == filter).collect(),
            None => seasons,
        }
    }

    /// Hint shown instead of season rows when the filtered season has no data.
    pub fn season_notice(&self) -> Option<String> {
        let season = self.selector.filter()?;
        let state = self.seasons.state();
        if state.is_loading {
            return None;
        }
        if let Some(data) = &state.data {
            return data
                .seasons
                .is_empty()
                .then(|| no_data_for_season(NO_DATA_PREFIX, season));
        }
        state.error.as_deref().map(|error| {
            season_error_message(
                NO_DATA_PREFIX,
                Some(season),
                Some(error),
                state.error_code.as_deref(),
            )
        })
    }

    pub fn selected_batter(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn season_filter(&self) -> Option<&str> {
        self.selector.filter()
    }

    pub fn search(&self) -> &PlayerSearch {
        &self.search
    }

    pub fn profile(&self) -> &ProfileController {
        &self.profile
    }

    pub fn seasons(&self) -> &SeasonProfileController {
        &self.seasons
    }

    pub fn recent_form(&self) -> &RecentFormController {
        &self.recent_form
    }

    fn season_labels(&self) -> Vec<String> {
        self.seasons
            .state()
            .data
            .map(|d| d.season_labels())
            .unwrap_or_default()
    }

    fn sync_queries(&self) {
        match &self.selected {
            Some(batter) => {
                self.profile.set_query(Some(ProfileQuery::new(batter)));
                self.seasons.set_query(Some(SeasonProfileQuery {
                    batter: batter.clone(),
                    season: self.selector.filter().map(str::to_string),
                }));
                self.recent_form.set_query(Some(RecentFormQuery {
                    batter: batter.clone(),
                    matches: RECENT_FORM_MATCHES,
                    season: None,
                }));
            }
            None => {
                self.profile.set_query(None);
                self.seasons.set_query(None);
                self.recent_form.set_query(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param, query_param_is_missing},
    };

    async fn mount_batter(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v1/batters/V%20Kohli/profile"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(TestDataBuilder::profile("V Kohli")),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batters/V%20Kohli/recent-form"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(TestDataBuilder::recent_form("V Kohli")),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batters/V%20Kohli/profile/seasons"))
            .and(query_param_is_missing("season"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                TestDataBuilder::season_profiles("V Kohli", &["2021", "2023", "2022"]),
            ))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batters/V%20Kohli/profile/seasons"))
            .and(query_param("season", "2023"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                TestDataBuilder::season_profiles("V Kohli", &["2023"]),
            ))
            .mount(server)
            .await;
    }

    fn session_for(server: &MockServer) -> BatterProfileSession {
        let config = Config::with_base_url(server.uri());
        let client = StatsClient::new(&config).unwrap();
        BatterProfileSession::new(&client, &config)
    }

    #[tokio::test]
    async fn test_select_batter_defaults_to_latest_season() {
        let server = MockServer::start().await;
        mount_batter(&server).await;
        let mut session = session_for(&server);

        session.select_batter("V Kohli");
        session.settle().await;

        assert_eq!(session.status(), ScreenStatus::Ready);
        assert_eq!(session.season_filter(), Some("2023"));
        let rows = session.season_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].season, "2023");
        assert!(session.season_notice().is_none());
    }

    #[tokio::test]
    async fn test_user_choice_survives_reload() {
        let server = MockServer::start().await;
        mount_batter(&server).await;
        let mut session = session_for(&server);
        session.select_batter("V Kohli");
        session.settle().await;

        session.select_season(None);
        session.settle().await;

        assert_eq!(session.season_filter(), None);
        assert_eq!(session.season_rows().len(), 3);
        assert_eq!(session.season_options().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_season_shows_notice() {
        let server = MockServer::start().await;
        mount_batter(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batters/V%20Kohli/profile/seasons"))
            .and(query_param("season", "2008"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestDataBuilder::season_profiles("V Kohli", &[])),
            )
            .mount(&server)
            .await;
        let mut session = session_for(&server);
        session.select_batter("V Kohli");
        session.settle().await;

        session.select_season(Some("2008".into()));
        session.settle().await;

        assert_eq!(
            session.season_notice().as_deref(),
            Some("No data for 2008. Try \"All seasons\" or another year.")
        );
        let labels: Vec<_> = session
            .season_options()
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["All seasons", "2008"]);
    }

    #[tokio::test]
    async fn test_failed_profile_retries_then_resets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_json(
                TestDataBuilder::error_body("SERVICE_UNAVAILABLE", "Database unavailable"),
            ))
            .mount(&server)
            .await;
        let mut session = session_for(&server);
        session.select_batter("V Kohli");
        session.settle().await;

        assert_eq!(
            session.status(),
            ScreenStatus::Failed {
                message: "Database unavailable".into(),
                retry_label: "Retry (3 of 3 left)".into(),
            }
        );

        for _ in 0..3 {
            assert!(matches!(session.retry(), RetryOutcome::Retried { .. }));
            session.settle().await;
        }
        assert_eq!(session.retry_label(), "Search again");

        assert_eq!(session.retry(), RetryOutcome::ResetRequested);
        assert_eq!(session.status(), ScreenStatus::Empty);
        assert_eq!(session.selected_batter(), None);
        assert_eq!(session.retry_label(), "Retry (3 of 3 left)");
    }

    #[tokio::test]
    async fn test_changing_batter_resets_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let mut session = session_for(&server);
        session.select_batter("V Kohli");
        session.settle().await;
        session.retry();
        assert_eq!(session.retry_label(), "Retry (2 of 3 left)");

        session.select_batter("RG Sharma");

        assert_eq!(session.retry_label(), "Retry (3 of 3 left)");
    }
}
