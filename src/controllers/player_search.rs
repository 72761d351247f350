//! Debounced player autocomplete.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::debounce::{Debounced, debounce};
use super::queries::{SearchController, SearchQuery, search_controller};
use super::resource::{Query, ResourceState};
use crate::data_fetcher::api::StatsClient;
use crate::data_fetcher::models::PlayerSearchResponse;

/// Free-text player search.
///
/// Text reaches the network only after it settles and only when it has at least the
/// minimum query length. Text too short to search clears suggestions at once.
pub struct PlayerSearch {
    raw: watch::Sender<String>,
    debounced: Debounced,
    controller: SearchController,
    applier: JoinHandle<()>,
}

impl PlayerSearch {
    /// Must be called from within a Tokio runtime.
    pub fn new(client: &StatsClient, quiet: Duration) -> Self {
        Self::with_controller(search_controller(client), quiet)
    }

    pub fn with_controller(controller: SearchController, quiet: Duration) -> Self {
        let (raw, raw_rx) = watch::channel(String::new());
        let debounced = debounce(raw_rx, quiet);

        let mut settled = debounced.subscribe();
        let target = controller.clone();
        let applier = tokio::spawn(async move {
            while settled.changed().await.is_ok() {
                let text = settled.borrow_and_update().clone();
                target.set_query(Some(SearchQuery::new(text)));
            }
        });

        Self {
            raw,
            debounced,
            controller,
            applier,
        }
    }

    pub fn set_text(&self, text: &str) {
        if SearchQuery::new(text).normalize().is_none() {
            self.controller.set_query(None);
            // Settled text must match the cleared query, or retyping the last search is lost
            self.debounced.reset(text);
        }
        self.raw.send_replace(text.to_string());
    }

    pub fn clear(&self) {
        self.set_text("");
    }

    /// Raw text as typed.
    pub fn text(&self) -> String {
        self.raw.borrow().clone()
    }

    /// Text the last search was issued for.
    pub fn settled_text(&self) -> String {
        self.debounced.current()
    }

    pub fn state(&self) -> ResourceState<PlayerSearchResponse> {
        self.controller.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<PlayerSearchResponse>> {
        self.controller.subscribe()
    }

    /// Suggested names, in server order. Empty while idle, loading or failed.
    pub fn suggestions(&self) -> Vec<String> {
        self.controller
            .state()
            .data
            .map(|response| response.players.into_iter().map(|p| p.name).collect())
            .unwrap_or_default()
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }
}

impl Drop for PlayerSearch {
    fn drop(&mut self) {
        self.applier.abort();
    }
}
