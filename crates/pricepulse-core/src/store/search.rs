// ── Search store ──
//
// Query/category editing and offer search across stores.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use super::generation::Generation;
use super::snapshot::{SearchEvent, SearchSnapshot};
use crate::intent::SearchIntent;
use crate::model::SearchQuery;
use crate::repository::SearchRepository;
use crate::stream::SnapshotStream;

const SEARCH_FAILED: &str = "Search failed";

/// UI-state store for the search screen. Cheaply cloneable.
pub struct SearchStore<R> {
    inner: Arc<SearchInner<R>>,
}

struct SearchInner<R> {
    repo: R,
    state: watch::Sender<Arc<SearchSnapshot>>,
    search: Generation,
    tasks: TaskTracker,
}

impl<R> Clone for SearchStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: SearchRepository> SearchStore<R> {
    pub fn new(repo: R) -> Self {
        Self::with_snapshot(repo, SearchSnapshot::default())
    }

    pub fn with_snapshot(repo: R, snapshot: SearchSnapshot) -> Self {
        let (state, _) = watch::channel(Arc::new(snapshot));
        Self {
            inner: Arc::new(SearchInner {
                repo,
                state,
                search: Generation::default(),
                tasks: TaskTracker::new(),
            }),
        }
    }

    pub fn snapshot(&self) -> Arc<SearchSnapshot> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> SnapshotStream<SearchSnapshot> {
        SnapshotStream::new(self.inner.state.subscribe())
    }

    // ── Operations ───────────────────────────────────────────────────

    pub fn set_query(&self, query: impl Into<String>) {
        self.publish(SearchEvent::QueryChanged(query.into()));
    }

    pub fn set_category(&self, category: impl Into<String>) {
        self.publish(SearchEvent::CategoryChanged(category.into()));
    }

    /// Search with the current query and category. Prior results stay
    /// visible until the new ones arrive.
    pub async fn search(&self) {
        let mut started = None;
        self.inner.state.send_modify(|snap| {
            started = Some(self.start(snap));
        });
        if let Some((generation, query)) = started {
            self.finish(generation, query).await;
        }
    }

    /// Run the initial search, unless results are already showing or a
    /// search is in flight.
    pub async fn load_demo_if_needed(&self) {
        let mut started = None;
        self.inner.state.send_if_modified(|snap| {
            if !snap.results.is_empty() || snap.is_loading {
                return false;
            }
            started = Some(self.start(snap));
            true
        });
        match started {
            Some((generation, query)) => self.finish(generation, query).await,
            None => debug!("initial results already present, skipping search"),
        }
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Run an intent; async ones become tracked background tasks.
    pub fn dispatch(&self, intent: SearchIntent) {
        match intent {
            SearchIntent::SetQuery(query) => self.set_query(query),
            SearchIntent::SetCategory(category) => self.set_category(category),
            SearchIntent::Search => {
                let store = self.clone();
                self.spawn(async move { store.search().await });
            }
            SearchIntent::LoadDemoIfNeeded => {
                let store = self.clone();
                self.spawn(async move { store.load_demo_if_needed().await });
            }
        }
    }

    /// Wait until every dispatched operation has finished.
    pub async fn idle(&self) {
        let tasks = &self.inner.tasks;
        tasks.close();
        tasks.wait().await;
        tasks.reopen();
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Mark a search as started inside a snapshot update. Returns its
    /// generation and the query it runs with.
    fn start(&self, snap: &mut Arc<SearchSnapshot>) -> (u64, SearchQuery) {
        let generation = self.inner.search.bump();
        let query = SearchQuery::new(snap.query.clone(), snap.category.clone());
        *snap = Arc::new(snap.apply(SearchEvent::Started));
        (generation, query)
    }

    async fn finish(&self, generation: u64, query: SearchQuery) {
        let event = match self.inner.repo.search(&query).await {
            Ok(results) => {
                debug!(query = %query.query, count = results.len(), "search results");
                SearchEvent::Loaded(results)
            }
            Err(err) => {
                warn!(query = %query.query, error = %err, "search failed");
                SearchEvent::Failed(err.describe_or(SEARCH_FAILED))
            }
        };

        let applied = self.inner.state.send_if_modified(|snap| {
            if !self.inner.search.is_current(generation) {
                return false;
            }
            *snap = Arc::new(snap.apply(event));
            true
        });
        if !applied {
            debug!(generation, "discarding superseded search");
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inner.tasks.spawn(task);
    }

    fn publish(&self, event: SearchEvent) {
        self.inner
            .state
            .send_modify(|snap| *snap = Arc::new(snap.apply(event)));
    }
}
