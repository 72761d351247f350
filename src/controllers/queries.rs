//! Query types for each resource and constructors that bind them to a [`StatsClient`].

use super::resource::{Query, ResourceController};
use crate::constants::search;
use crate::data_fetcher::api::{ListPlayersParams, MatchupOptions, StatsClient};
use crate::data_fetcher::models::{
    BatterBowlerMatchupResponse, BatterProfileResponse, BatterRecentFormResponse,
    BatterSeasonProfileResponse, MatchInfoResponse, PlayerListResponse, PlayerSearchResponse,
    SeasonsResponse,
};

fn trimmed(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn trimmed_opt(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(trimmed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileQuery {
    pub batter: String,
}

impl ProfileQuery {
    pub fn new(batter: impl Into<String>) -> Self {
        Self {
            batter: batter.into(),
        }
    }
}

impl Query for ProfileQuery {
    fn normalize(&self) -> Option<Self> {
        Some(Self::new(trimmed(&self.batter)?))
    }
}

/// Season breakdown; `season: None` asks for every season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonProfileQuery {
    pub batter: String,
    pub season: Option<String>,
}

impl Query for SeasonProfileQuery {
    fn normalize(&self) -> Option<Self> {
        Some(Self {
            batter: trimmed(&self.batter)?,
            season: trimmed_opt(&self.season),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentFormQuery {
    pub batter: String,
    pub matches: u32,
    pub season: Option<String>,
}

impl Query for RecentFormQuery {
    fn normalize(&self) -> Option<Self> {
        if self.matches == 0 {
            return None;
        }
        Some(Self {
            batter: trimmed(&self.batter)?,
            matches: self.matches,
            season: trimmed_opt(&self.season),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchQuery {
    pub match_id: u64,
}

impl MatchQuery {
    /// Parses user input such as `" 335982 "`. Anything but a positive integer is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        input
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .map(|match_id| Self { match_id })
    }
}

impl Query for MatchQuery {
    fn normalize(&self) -> Option<Self> {
        (self.match_id > 0).then_some(*self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupQuery {
    pub batter: String,
    pub bowler: String,
    pub season: Option<String>,
    pub venue: Option<String>,
}

impl MatchupQuery {
    pub fn new(batter: impl Into<String>, bowler: impl Into<String>) -> Self {
        Self {
            batter: batter.into(),
            bowler: bowler.into(),
            season: None,
            venue: None,
        }
    }

    pub fn with_season(mut self, season: Option<String>) -> Self {
        self.season = season;
        self
    }

    fn options(&self) -> MatchupOptions {
        MatchupOptions {
            season: self.season.clone(),
            venue: self.venue.clone(),
            ..MatchupOptions::default()
        }
    }
}

impl Query for MatchupQuery {
    fn normalize(&self) -> Option<Self> {
        Some(Self {
            batter: trimmed(&self.batter)?,
            bowler: trimmed(&self.bowler)?,
            season: trimmed_opt(&self.season),
            venue: trimmed_opt(&self.venue),
        })
    }
}

/// Autocomplete query. Fetchable only from [`search::MIN_QUERY_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: search::SUGGESTION_LIMIT,
        }
    }
}

impl Query for SearchQuery {
    fn normalize(&self) -> Option<Self> {
        let text = self.text.trim();
        if text.chars().count() < search::MIN_QUERY_LENGTH {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            limit: self.limit,
        })
    }
}

/// The global season list takes no parameters; `SeasonsQuery` exists only to enable it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonsQuery;

impl Query for SeasonsQuery {
    fn normalize(&self) -> Option<Self> {
        Some(*self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayersQuery(pub ListPlayersParams);

impl Query for PlayersQuery {
    fn normalize(&self) -> Option<Self> {
        Some(Self(ListPlayersParams {
            search: trimmed_opt(&self.0.search),
            ..self.0.clone()
        }))
    }
}

pub type ProfileController = ResourceController<ProfileQuery, BatterProfileResponse>;
pub type SeasonProfileController =
    ResourceController<SeasonProfileQuery, BatterSeasonProfileResponse>;
pub type RecentFormController = ResourceController<RecentFormQuery, BatterRecentFormResponse>;
pub type MatchController = ResourceController<MatchQuery, MatchInfoResponse>;
pub type MatchupController = ResourceController<MatchupQuery, BatterBowlerMatchupResponse>;
pub type SearchController = ResourceController<SearchQuery, PlayerSearchResponse>;
pub type SeasonsController = ResourceController<SeasonsQuery, SeasonsResponse>;
pub type PlayersController = ResourceController<PlayersQuery, PlayerListResponse>;

pub fn profile_controller(client: &StatsClient) -> ProfileController {
    let client = client.clone();
    ResourceController::new("batter_profile", move |q: ProfileQuery| {
        let client = client.clone();
        async move { client.batter_profile(&q.batter).await }
    })
}

pub fn season_profile_controller(client: &StatsClient) -> SeasonProfileController {
    let client = client.clone();
    ResourceController::new("batter_seasons", move |q: SeasonProfileQuery| {
        let client = client.clone();
        async move { client.batter_seasons(&q.batter, q.season.as_deref()).await }
    })
}

pub fn recent_form_controller(client: &StatsClient) -> RecentFormController {
    let client = client.clone();
    ResourceController::new("batter_recent_form", move |q: RecentFormQuery| {
        let client = client.clone();
        async move {
            client
                .batter_recent_form(&q.batter, q.matches, q.season.as_deref())
                .await
        }
    })
}

pub fn match_controller(client: &StatsClient) -> MatchController {
    let client = client.clone();
    ResourceController::new("match_info", move |q: MatchQuery| {
        let client = client.clone();
        async move { client.match_info(q.match_id).await }
    })
}

pub fn matchup_controller(client: &StatsClient) -> MatchupController {
    let client = client.clone();
    ResourceController::new("matchup", move |q: MatchupQuery| {
        let client = client.clone();
        async move { client.matchup(&q.batter, &q.bowler, &q.options()).await }
    })
}

pub fn search_controller(client: &StatsClient) -> SearchController {
    let client = client.clone();
    ResourceController::new("player_search", move |q: SearchQuery| {
        let client = client.clone();
        async move { client.search_players(&q.text, q.limit).await }
    })
}

pub fn seasons_controller(client: &StatsClient) -> SeasonsController {
    let client = client.clone();
    ResourceController::new("seasons", move |_: SeasonsQuery| {
        let client = client.clone();
        async move { client.seasons().await }
    })
}

pub fn players_controller(client: &StatsClient) -> PlayersController {
    let client = client.clone();
    ResourceController::new("players", move |q: PlayersQuery| {
        let client = client.clone();
        async move { client.list_players(&q.0).await }
    })
}
