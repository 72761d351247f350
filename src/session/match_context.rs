use tracing::debug;

use super::{RETRY, ScreenStatus};
use crate::controllers::{MatchController, MatchQuery, Refetch, match_controller};
use crate::data_fetcher::api::StatsClient;
use crate::data_fetcher::models::MatchInfoResponse;

/// Match lookup by numeric id. Retry is a plain refetch with no upper bound.
pub struct MatchContextSession {
    input: String,
    submitted: Option<MatchQuery>,
    controller: MatchController,
}

impl MatchContextSession {
    pub fn new(client: &StatsClient) -> Self {
        Self {
            input: String::new(),
            submitted: None,
            controller: match_controller(client),
        }
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// True when the input parses to a positive match id.
    pub fn can_load(&self) -> bool {
        MatchQuery::parse(&self.input).is_some()
    }

    /// Submits the input. Invalid input leaves the current match untouched.
    /// Returns true when a fetch was requested.
    pub fn load(&mut self) -> bool {
        match MatchQuery::parse(&self.input) {
            Some(query) => {
                self.submitted = Some(query);
                self.controller.set_query(Some(query));
                true
            }
            None => {
                debug!("Ignoring invalid match id {:?}", self.input);
                false
            }
        }
    }

    /// Loads a match id directly, e.g. from a deep link.
    pub fn load_id(&mut self, match_id: u64) -> bool {
        self.input = match_id.to_string();
        self.load()
    }

    pub fn retry(&self) {
        self.controller.refetch();
    }

    pub fn retry_label(&self) -> &'static str {
        RETRY
    }

    /// "View another match": back to an empty input.
    pub fn clear(&mut self) {
        self.input.clear();
        self.submitted = None;
        self.controller.set_query(None);
    }

    pub fn status(&self) -> ScreenStatus {
        if self.submitted.is_none() {
            return ScreenStatus::Empty;
        }
        let state = self.controller.state();
        if state.data.is_some() {
            return ScreenStatus::Ready;
        }
        match state.error {
            Some(message) if !state.is_loading => ScreenStatus::Failed {
                message,
                retry_label: RETRY.to_string(),
            },
            _ => ScreenStatus::Loading,
        }
    }

    pub async fn settle(&self) -> Option<MatchInfoResponse> {
        self.controller.settled().await.data
    }

    pub fn data(&self) -> Option<MatchInfoResponse> {
        self.controller.state().data
    }

    pub fn controller(&self) -> &MatchController {
        &self.controller
    }
}
