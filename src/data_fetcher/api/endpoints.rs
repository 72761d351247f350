//! Typed wrappers for each API route.

use tracing::instrument;

use super::client::StatsClient;
use super::urls::{
    QueryParams, batter_profile_route, batter_recent_form_route, batter_seasons_route,
    match_info_route, matchup_route,
};
use crate::constants::{query_defaults, search};
use crate::data_fetcher::models::{
    BatterBowlerMatchupResponse, BatterProfileResponse, BatterRecentFormResponse,
    BatterSeasonProfileResponse, HealthResponse, MatchInfoResponse, PlayerListResponse,
    PlayerSearchResponse, SeasonsResponse,
};
use crate::error::AppError;

/// Optional filters for the matchup route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupOptions {
    pub season: Option<String>,
    pub venue: Option<String>,
    pub include_phases: bool,
}

impl Default for MatchupOptions {
    fn default() -> Self {
        Self {
            season: None,
            venue: None,
            include_phases: true,
        }
    }
}

/// Pagination and filter for the player listing route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPlayersParams {
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListPlayersParams {
    fn default() -> Self {
        Self {
            search: None,
            limit: query_defaults::PLAYER_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl StatsClient {
    /// Career stats, phase performance and dismissals for a batter.
    #[instrument(skip(self))]
    pub async fn batter_profile(&self, batter: &str) -> Result<BatterProfileResponse, AppError> {
        self.get_route(&batter_profile_route(batter), &QueryParams::new())
            .await
    }

    /// Per-season breakdown for a batter. `None` returns every season.
    #[instrument(skip(self))]
    pub async fn batter_seasons(
        &self,
        batter: &str,
        season: Option<&str>,
    ) -> Result<BatterSeasonProfileResponse, AppError> {
        let params = QueryParams::new().with_opt("season", season);
        self.get_route(&batter_seasons_route(batter), &params).await
    }

    /// Summary of the batter's last `matches` innings.
    #[instrument(skip(self))]
    pub async fn batter_recent_form(
        &self,
        batter: &str,
        matches: u32,
        season: Option<&str>,
    ) -> Result<BatterRecentFormResponse, AppError> {
        let params = QueryParams::new()
            .with("matches", matches)
            .with_opt("season", season);
        self.get_route(&batter_recent_form_route(batter), &params).await
    }

    #[instrument(skip(self))]
    pub async fn match_info(&self, match_id: u64) -> Result<MatchInfoResponse, AppError> {
        self.get_route(&match_info_route(match_id), &QueryParams::new())
            .await
    }

    /// Head-to-head stats for a batter against a bowler.
    #[instrument(skip(self))]
    pub async fn matchup(
        &self,
        batter: &str,
        bowler: &str,
        options: &MatchupOptions,
    ) -> Result<BatterBowlerMatchupResponse, AppError> {
        let params = QueryParams::new()
            .with_opt("season", options.season.as_deref())
            .with_opt("venue", options.venue.as_deref())
            .with("include_phases", options.include_phases);
        self.get_route(&matchup_route(batter, bowler), &params).await
    }

    /// Autocomplete suggestions. The query is trimmed before sending.
    #[instrument(skip(self))]
    pub async fn search_players(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<PlayerSearchResponse, AppError> {
        let params = QueryParams::new().with("q", query.trim()).with("limit", limit);
        self.get("/players/search", &params).await
    }

    /// Autocomplete suggestions with the default limit.
    pub async fn suggest_players(&self, query: &str) -> Result<PlayerSearchResponse, AppError> {
        self.search_players(query, search::SUGGESTION_LIMIT).await
    }

    #[instrument(skip(self))]
    pub async fn list_players(
        &self,
        params: &ListPlayersParams,
    ) -> Result<PlayerListResponse, AppError> {
        let query = QueryParams::new()
            .with_opt("search", params.search.as_deref())
            .with("limit", params.limit)
            .with("offset", params.offset);
        self.get("/players", &query).await
    }

    /// Season labels that have match data.
    #[instrument(skip(self))]
    pub async fn seasons(&self) -> Result<SeasonsResponse, AppError> {
        self.get("/seasons", &QueryParams::new()).await
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse, AppError> {
        self.get("/health", &QueryParams::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing_utils::TestDataBuilder;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    async fn client_for(server: &MockServer) -> StatsClient {
        StatsClient::new(&Config::with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_batter_profile_encodes_name() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batters/V%20Kohli/profile"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(TestDataBuilder::profile("V Kohli")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let profile = client.batter_profile("  V Kohli ").await.unwrap();

        assert_eq!(profile.batter, "V Kohli");
    }

    #[tokio::test]
    async fn test_batter_seasons_omits_season_when_absent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batters/V%20Kohli/profile/seasons"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                TestDataBuilder::season_profiles("V Kohli", &["2016", "2013"]),
            ))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client.batter_seasons("V Kohli", None).await.unwrap();
        assert_eq!(response.seasons.len(), 2);

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_recent_form_sends_matches_and_season() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batters/V%20Kohli/recent-form"))
            .and(query_param("matches", "5"))
            .and(query_param("season", "2016"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(TestDataBuilder::recent_form("V Kohli")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let form = client
            .batter_recent_form("V Kohli", 5, Some("2016"))
            .await
            .unwrap();

        assert_eq!(form.summary.matches, 5);
    }

    #[tokio::test]
    async fn test_matchup_defaults_include_phases() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/matchups/batter/V%20Kohli/bowler/JJ%20Bumrah"))
            .and(query_param("include_phases", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestDataBuilder::matchup("V Kohli", "JJ Bumrah", 140)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let matchup = client
            .matchup("V Kohli", "JJ Bumrah", &MatchupOptions::default())
            .await
            .unwrap();

        assert_eq!(matchup.overall.runs, 140);
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("include_phases=true"));
    }

    #[tokio::test]
    async fn test_search_players_trims_query() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/players/search"))
            .and(query_param("q", "Kohli"))
            .and(query_param("limit", "10"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestDataBuilder::search_results(&["V Kohli", "Virat Kohli"])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let results = client.suggest_players("  Kohli ").await.unwrap();

        assert_eq!(results.players.len(), 2);
    }

    #[tokio::test]
    async fn test_match_info_and_seasons() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/matches/335982"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(TestDataBuilder::match_info(335982)),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/seasons"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"seasons": ["2009", "2008"]})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let info = client.match_info(335982).await.unwrap();
        let seasons = client.seasons().await.unwrap();

        assert_eq!(info.match_id, 335982);
        assert_eq!(seasons.seasons, vec!["2009", "2008"]);
    }
}
