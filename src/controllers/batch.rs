//! Batch controller: one subject fetched against a list of items in parallel.
//!
//! Results are published only after every item has settled, as two vectors
//! index-aligned with the item list. One item failing never affects the others.

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::resource::Refetch;
use crate::data_fetcher::api::{MatchupOptions, StatsClient};
use crate::data_fetcher::models::BatterBowlerMatchupResponse;
use crate::error::AppError;

pub type BatchFetcher<T> =
    Arc<dyn Fn(String, String) -> BoxFuture<'static, Result<T, AppError>> + Send + Sync + 'static>;

/// A subject (e.g. a batter) and the items (e.g. bowlers) to fetch against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchQuery {
    pub subject: String,
    pub items: Vec<String>,
}

impl BatchQuery {
    pub fn new<I, S>(subject: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject: subject.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Trims the subject and every item, dropping blank items.
    /// Returns `None` when nothing is left to fetch.
    pub fn normalize(&self) -> Option<Self> {
        let subject = self.subject.trim();
        let items: Vec<String> = self
            .items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        if subject.is_empty() || items.is_empty() {
            return None;
        }
        Some(Self {
            subject: subject.to_string(),
            items,
        })
    }
}

/// Published state of a [`BatchController`].
///
/// After a batch settles, `data`, `errors` and `error_codes` all have one entry per item.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchState<T> {
    pub data: Vec<Option<T>>,
    pub errors: Vec<Option<String>>,
    pub error_codes: Vec<Option<String>>,
    pub is_loading: bool,
}

impl<T> Default for BatchState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            errors: Vec::new(),
            error_codes: Vec::new(),
            is_loading: false,
        }
    }
}

impl<T> BatchState<T> {
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Option::is_some)
    }

    pub fn is_idle(&self) -> bool {
        self.data.is_empty() && self.errors.is_empty() && !self.is_loading
    }
}

struct Inner<T> {
    label: String,
    fetcher: BatchFetcher<T>,
    query: Mutex<Option<BatchQuery>>,
    generation: AtomicU64,
    state: watch::Sender<BatchState<T>>,
}

impl<T> Inner<T> {
    fn commit(&self, token: u64, results: Vec<Result<T, AppError>>) {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != token {
                debug!("{}: discarding stale batch (generation {token})", self.label);
                return false;
            }
            let mut data = Vec::with_capacity(results.len());
            let mut errors = Vec::with_capacity(results.len());
            let mut codes = Vec::with_capacity(results.len());
            for result in results {
                match result {
                    Ok(value) => {
                        data.push(Some(value));
                        errors.push(None);
                        codes.push(None);
                    }
                    Err(e) => {
                        warn!("{}: item failed: {}", self.label, e);
                        data.push(None);
                        errors.push(Some(e.message()));
                        codes.push(e.code().map(str::to_string));
                    }
                }
            }
            *state = BatchState {
                data,
                errors,
                error_codes: codes,
                is_loading: false,
            };
            true
        });
    }
}

/// Cheap, cloneable handle over one batch's state.
pub struct BatchController<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for BatchController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> BatchController<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(label: impl Into<String>, fetcher: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let fetcher: BatchFetcher<T> =
            Arc::new(move |subject, item| fetcher(subject, item).boxed());
        Self {
            inner: Arc::new(Inner {
                label: label.into(),
                fetcher,
                query: Mutex::new(None),
                generation: AtomicU64::new(0),
                state: watch::Sender::new(BatchState::default()),
            }),
        }
    }

    /// Points the controller at a new batch.
    ///
    /// `None`, an empty subject or an empty item list publishes empty vectors without
    /// touching the network. A batch equal to the current one does nothing.
    pub fn set_query(&self, query: Option<BatchQuery>) {
        let next = query.and_then(|q| q.normalize());
        let mut current = self.inner.query.lock().unwrap_or_else(|e| e.into_inner());

        match next {
            None => {
                *current = None;
                self.inner.generation.fetch_add(1, Ordering::SeqCst);
                self.inner.state.send_if_modified(|state| {
                    if state.is_idle() {
                        false
                    } else {
                        *state = BatchState::default();
                        true
                    }
                });
            }
            Some(q) => {
                if current.as_ref() == Some(&q) {
                    return;
                }
                *current = Some(q.clone());
                drop(current);
                self.start_batch(q, false);
            }
        }
    }

    pub fn query(&self) -> Option<BatchQuery> {
        self.inner
            .query
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn state(&self) -> BatchState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BatchState<T>> {
        self.inner.state.subscribe()
    }

    /// Waits until no batch is in flight and returns that state.
    pub async fn settled(&self) -> BatchState<T> {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    fn start_batch(&self, query: BatchQuery, keep_data: bool) {
        let token = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "{}: fetching {} against {} item(s)",
            self.inner.label,
            query.subject,
            query.items.len()
        );

        let count = query.items.len();
        self.inner.state.send_modify(|state| {
            state.is_loading = true;
            state.errors = vec![None; count];
            state.error_codes = vec![None; count];
            if !keep_data {
                state.data = Vec::new();
            }
        });

        let fetches: Vec<_> = query
            .items
            .iter()
            .map(|item| (self.inner.fetcher)(query.subject.clone(), item.clone()))
            .collect();
        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let label = self.inner.label.clone();
        tokio::spawn(async move {
            let results = join_all(fetches).await;
            match weak.upgrade() {
                Some(inner) => inner.commit(token, results),
                None => debug!("{label}: controller dropped, discarding batch"),
            }
        });
    }
}

impl<T> Refetch for BatchController<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Re-runs the current batch; no-op when idle.
    fn refetch(&self) {
        if let Some(query) = self.query() {
            self.start_batch(query, true);
        }
    }
}

pub type MatchupBatchController = BatchController<BatterBowlerMatchupResponse>;

/// Batter against each bowler, with default matchup options.
pub fn matchup_batch_controller(client: &StatsClient) -> MatchupBatchController {
    let client = client.clone();
    BatchController::new("matchups_batch", move |batter: String, bowler: String| {
        let client = client.clone();
        async move {
            client
                .matchup(&batter, &bowler, &MatchupOptions::default())
                .await
        }
    })
}
