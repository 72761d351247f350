//! Single-resource controller.
//!
//! Holds the `{data, is_loading, error, error_code}` state for one remote resource and
//! keeps it consistent with the most recent query. Every fetch is tagged with a
//! generation token; a result whose token is no longer current is discarded, so a
//! slow response for an old query can never overwrite the state of a newer one.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::fmt::Debug;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::AppError;

/// Async fetch function for one query.
pub type Fetcher<Q, T> =
    Arc<dyn Fn(Q) -> BoxFuture<'static, Result<T, AppError>> + Send + Sync + 'static>;

/// Parameters identifying one fetch.
///
/// `normalize` returns the canonical form of the query (names trimmed), or `None`
/// when the query cannot be fetched. An unfetchable query behaves like no query.
pub trait Query: Clone + PartialEq + Debug + Send + Sync + 'static {
    fn normalize(&self) -> Option<Self>;
}

/// Anything that can re-issue its current fetch.
pub trait Refetch {
    fn refetch(&self);
}

/// Published state of a [`ResourceController`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub error_code: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
            error_code: None,
        }
    }
}

impl<T> ResourceState<T> {
    /// True when nothing is loaded, loading or failed.
    pub fn is_idle(&self) -> bool {
        self.data.is_none() && !self.is_loading && self.error.is_none()
    }

    pub fn has_error_code(&self, code: &str) -> bool {
        self.error_code.as_deref() == Some(code)
    }
}

struct Inner<Q, T> {
    label: String,
    fetcher: Fetcher<Q, T>,
    query: Mutex<Option<Q>>,
    generation: AtomicU64,
    state: watch::Sender<ResourceState<T>>,
}

impl<Q, T> Inner<Q, T> {
    fn commit(&self, token: u64, result: Result<T, AppError>) {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != token {
                debug!("{}: discarding stale result (generation {token})", self.label);
                return false;
            }
            state.is_loading = false;
            match result {
                Ok(data) => {
                    debug!("{}: fetch succeeded", self.label);
                    state.data = Some(data);
                    state.error = None;
                    state.error_code = None;
                }
                Err(e) => {
                    warn!("{}: fetch failed: {}", self.label, e);
                    state.data = None;
                    state.error = Some(e.message());
                    state.error_code = e.code().map(str::to_string);
                }
            }
            true
        });
    }
}

/// Cheap, cloneable handle over one resource's state.
///
/// Clones share state. Fetches are spawned on the current Tokio runtime, so
/// `set_query` and `refetch` must be called from within one.
pub struct ResourceController<Q, T> {
    inner: Arc<Inner<Q, T>>,
}

impl<Q, T> Clone for ResourceController<Q, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Q, T> ResourceController<Q, T>
where
    Q: Query,
    T: Clone + Send + Sync + 'static,
{
    /// Creates an idle controller. `label` only appears in logs.
    pub fn new<F, Fut>(label: impl Into<String>, fetcher: F) -> Self
    where
        F: Fn(Q) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let fetcher: Fetcher<Q, T> = Arc::new(move |query| fetcher(query).boxed());
        Self {
            inner: Arc::new(Inner {
                label: label.into(),
                fetcher,
                query: Mutex::new(None),
                generation: AtomicU64::new(0),
                state: watch::Sender::new(ResourceState::default()),
            }),
        }
    }

    /// Points the controller at a new query.
    ///
    /// `None` (or a query that normalizes to nothing) clears the state at once and
    /// invalidates any fetch in flight. A query equal to the current one does nothing.
    pub fn set_query(&self, query: Option<Q>) {
        let next = query.and_then(|q| q.normalize());
        let mut current = self.inner.query.lock().unwrap_or_else(|e| e.into_inner());

        match next {
            None => {
                if current.take().is_some() {
                    debug!("{}: query cleared", self.inner.label);
                }
                self.inner.generation.fetch_add(1, Ordering::SeqCst);
                self.inner.state.send_if_modified(|state| {
                    if state.is_idle() {
                        false
                    } else {
                        *state = ResourceState::default();
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
                self.start_fetch(q, false);
            }
        }
    }

    /// Current (normalized) query, if any.
    pub fn query(&self) -> Option<Q> {
        self.inner
            .query
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every published state change.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    /// Waits until no fetch is in flight and returns that state.
    pub async fn settled(&self) -> ResourceState<T> {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    fn start_fetch(&self, query: Q, keep_data: bool) {
        let token = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("{}: fetching {:?}", self.inner.label, query);

        self.inner.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
            state.error_code = None;
            if !keep_data {
                state.data = None;
            }
        });

        let fetch = (self.inner.fetcher)(query);
        let weak: Weak<Inner<Q, T>> = Arc::downgrade(&self.inner);
        let label = self.inner.label.clone();
        tokio::spawn(async move {
            let result = fetch.await;
            match weak.upgrade() {
                Some(inner) => inner.commit(token, result),
                None => debug!("{label}: controller dropped, discarding result"),
            }
        });
    }
}

impl<Q, T> Refetch for ResourceController<Q, T>
where
    Q: Query,
    T: Clone + Send + Sync + 'static,
{
    /// Re-issues the current query. Loaded data stays visible while loading.
    fn refetch(&self) {
        if let Some(query) = self.query() {
            self.start_fetch(query, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Name(String);

    impl Query for Name {
        fn normalize(&self) -> Option<Self> {
            let trimmed = self.0.trim();
            (!trimmed.is_empty()).then(|| Name(trimmed.to_string()))
        }
    }

    fn echo_controller(calls: Arc<AtomicUsize>) -> ResourceController<Name, String> {
        ResourceController::new("echo", move |q: Name| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if q.0 == "missing" {
                    Err(AppError::http(404, "NOT_FOUND", "Batter 'missing' not found", None, "u"))
                } else {
                    Ok(format!("hello {}", q.0))
                }
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_success_publishes_data() {
        let calls = Arc::new(AtomicUsize::new(0));
        let controller = echo_controller(Arc::clone(&calls));

        controller.set_query(Some(Name(" V Kohli ".into())));
        assert!(controller.state().is_loading);

        let state = controller.settled().await;
        assert_eq!(state.data.as_deref(), Some("hello V Kohli"));
        assert!(state.error.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_records_message_and_code() {
        let controller = echo_controller(Arc::new(AtomicUsize::new(0)));

        controller.set_query(Some(Name("missing".into())));
        let state = controller.settled().await;

        assert!(state.data.is_none());
        assert_eq!(state.error.as_deref(), Some("Batter 'missing' not found"));
        assert!(state.has_error_code("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_identical_query_is_noop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let controller = echo_controller(Arc::clone(&calls));

        controller.set_query(Some(Name("a".into())));
        controller.settled().await;
        controller.set_query(Some(Name("  a".into())));
        controller.settled().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disable_clears_state_synchronously() {
        let controller = echo_controller(Arc::new(AtomicUsize::new(0)));
        controller.set_query(Some(Name("a".into())));
        controller.settled().await;

        controller.set_query(None);

        assert_eq!(controller.state(), ResourceState::default());
        assert!(controller.query().is_none());
    }

    #[tokio::test]
    async fn test_blank_query_counts_as_disabled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let controller = echo_controller(Arc::clone(&calls));

        controller.set_query(Some(Name("   ".into())));

        assert!(controller.state().is_idle());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let controller: ResourceController<Name, String> =
            ResourceController::new("slow", |q: Name| async move {
                let delay = if q.0 == "old" { 500 } else { 10 };
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(q.0)
            });

        controller.set_query(Some(Name("old".into())));
        controller.set_query(Some(Name("new".into())));
        let state = controller.settled().await;
        assert_eq!(state.data.as_deref(), Some("new"));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(controller.state().data.as_deref(), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_result_dropped_after_disable() {
        let controller: ResourceController<Name, String> =
            ResourceController::new("slow", |q: Name| async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok(q.0)
            });

        controller.set_query(Some(Name("a".into())));
        controller.set_query(None);
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(controller.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_keeps_data_while_loading() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let controller: ResourceController<Name, usize> =
            ResourceController::new("count", move |_q: Name| {
                let counter = Arc::clone(&counter);
                async move {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
                }
            });

        controller.set_query(Some(Name("a".into())));
        assert_eq!(controller.settled().await.data, Some(1));

        controller.refetch();
        let loading = controller.state();
        assert!(loading.is_loading);
        assert_eq!(loading.data, Some(1));

        assert_eq!(controller.settled().await.data, Some(2));
    }

    #[tokio::test]
    async fn test_refetch_without_query_does_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let controller = echo_controller(Arc::clone(&calls));

        controller.refetch();

        assert!(controller.state().is_idle());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
