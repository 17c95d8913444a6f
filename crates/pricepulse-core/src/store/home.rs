// ── Home store ──
//
// Drives the catalog flow: login/register stubs, the product list, product
// detail with best-effort price history, and product creation.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use super::generation::Generation;
use super::snapshot::{HomeEvent, HomeSnapshot, Screen};
use crate::intent::HomeIntent;
use crate::model::{NewProduct, ProductId};
use crate::repository::CatalogRepository;
use crate::stream::SnapshotStream;

const LOAD_PRODUCTS_FAILED: &str = "Failed to load products";
const LOAD_PRODUCT_FAILED: &str = "Failed to load product";
const ADD_PRODUCT_FAILED: &str = "Failed to add product";

/// UI-state store for the catalog screens.
///
/// Cheaply cloneable; clones share one snapshot. Operations that spawn
/// follow-ups (`navigate`, `open_detail`, `add_product`, `dispatch`) must
/// run inside a Tokio runtime.
pub struct HomeStore<R> {
    inner: Arc<HomeInner<R>>,
}

struct HomeInner<R> {
    repo: R,
    state: watch::Sender<Arc<HomeSnapshot>>,
    list: Generation,
    /// Shared by `open_detail` and `add_product`: both replace the selection.
    selection: Generation,
    history: Generation,
    tasks: TaskTracker,
}

impl<R> Clone for HomeStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: CatalogRepository> HomeStore<R> {
    pub fn new(repo: R) -> Self {
        Self::with_snapshot(repo, HomeSnapshot::default())
    }

    pub fn with_snapshot(repo: R, snapshot: HomeSnapshot) -> Self {
        let (state, _) = watch::channel(Arc::new(snapshot));
        Self {
            inner: Arc::new(HomeInner {
                repo,
                state,
                list: Generation::default(),
                selection: Generation::default(),
                history: Generation::default(),
                tasks: TaskTracker::new(),
            }),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<HomeSnapshot> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> SnapshotStream<HomeSnapshot> {
        SnapshotStream::new(self.inner.state.subscribe())
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Switch screens. Entering the product list also refreshes it.
    pub fn navigate(&self, screen: Screen) {
        let refresh = screen == Screen::ProductList;
        self.publish(HomeEvent::Navigate(screen));
        if refresh {
            let generation = self.begin(&self.inner.list);
            let store = self.clone();
            self.spawn(async move { store.finish_refresh(generation).await });
        }
    }

    /// Fetch every tracked product.
    pub async fn refresh_list(&self) {
        let generation = self.begin(&self.inner.list);
        self.finish_refresh(generation).await;
    }

    /// Fetch one product and show it, then load its history in the background.
    pub async fn open_detail(&self, id: impl Into<ProductId>) {
        let id = id.into();
        let generation = self.begin(&self.inner.selection);

        match self.inner.repo.load_product(&id).await {
            Ok(detail) => {
                let applied =
                    self.complete(&self.inner.selection, generation, HomeEvent::DetailLoaded(detail));
                if applied {
                    self.spawn_history(id);
                }
            }
            Err(err) => {
                warn!(product_id = %id, error = %err, "failed to load product");
                let message = err.describe_or(LOAD_PRODUCT_FAILED);
                self.complete(&self.inner.selection, generation, HomeEvent::Failed(message));
            }
        }
    }

    /// Best-effort history fetch. Failures are logged and otherwise ignored;
    /// the loading flag is left alone.
    pub async fn load_history(&self, id: impl Into<ProductId>) {
        let id = id.into();
        let generation = self.inner.history.bump();

        match self.inner.repo.load_history(&id).await {
            Ok(history) => {
                self.complete(&self.inner.history, generation, HomeEvent::HistoryLoaded(history));
            }
            Err(err) => debug!(product_id = %id, error = %err, "price history unavailable"),
        }
    }

    /// Start tracking a product listed on Amazon and Flipkart. On success the
    /// new product is opened, and the list and its history are refreshed in
    /// the background. The caller owns (and clears) any form input.
    pub async fn add_product(
        &self,
        name: impl Into<String>,
        image_url: Option<String>,
        amazon_url: impl Into<String>,
        flipkart_url: impl Into<String>,
    ) {
        let request = NewProduct::new(name, image_url, amazon_url, flipkart_url);
        let generation = self.begin(&self.inner.selection);

        match self.inner.repo.add_product(request).await {
            Ok(detail) => {
                let id = detail.id().clone();
                debug!(product_id = %id, "product added");
                let applied =
                    self.complete(&self.inner.selection, generation, HomeEvent::DetailLoaded(detail));

                let list_generation = self.begin(&self.inner.list);
                let store = self.clone();
                self.spawn(async move { store.finish_refresh(list_generation).await });
                if applied {
                    self.spawn_history(id);
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to add product");
                let message = err.describe_or(ADD_PRODUCT_FAILED);
                self.complete(&self.inner.selection, generation, HomeEvent::Failed(message));
            }
        }
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Run an intent as a tracked background task.
    pub fn dispatch(&self, intent: HomeIntent) {
        let store = self.clone();
        match intent {
            HomeIntent::Navigate(screen) => self.navigate(screen),
            HomeIntent::RefreshList => self.spawn(async move { store.refresh_list().await }),
            HomeIntent::OpenDetail(id) => self.spawn(async move { store.open_detail(id).await }),
            HomeIntent::LoadHistory(id) => self.spawn(async move { store.load_history(id).await }),
            HomeIntent::AddProduct {
                name,
                image_url,
                amazon_url,
                flipkart_url,
            } => self.spawn(async move {
                store
                    .add_product(name, image_url, amazon_url, flipkart_url)
                    .await;
            }),
        }
    }

    /// Wait until every dispatched operation and follow-up has finished.
    pub async fn idle(&self) {
        let tasks = &self.inner.tasks;
        tasks.close();
        tasks.wait().await;
        tasks.reopen();
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn finish_refresh(&self, generation: u64) {
        match self.inner.repo.load_products().await {
            Ok(products) => {
                self.complete(&self.inner.list, generation, HomeEvent::ProductsLoaded(products));
            }
            Err(err) => {
                warn!(error = %err, "failed to load products");
                let message = err.describe_or(LOAD_PRODUCTS_FAILED);
                self.complete(&self.inner.list, generation, HomeEvent::Failed(message));
            }
        }
    }

    fn spawn_history(&self, id: ProductId) {
        // Uncoupled: a failed history fetch never affects the detail screen.
        let store = self.clone();
        self.spawn(async move { store.load_history(id).await });
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inner.tasks.spawn(task);
    }

    /// Bump `class` and publish the loading snapshot.
    fn begin(&self, class: &Generation) -> u64 {
        let generation = class.bump();
        self.publish(HomeEvent::Started);
        generation
    }

    fn publish(&self, event: HomeEvent) {
        self.inner
            .state
            .send_modify(|snap| *snap = Arc::new(snap.apply(event)));
    }

    /// Publish `event` if `generation` is still the newest of its class.
    fn complete(&self, class: &Generation, generation: u64, event: HomeEvent) -> bool {
        let applied = self.inner.state.send_if_modified(|snap| {
            if !class.is_current(generation) {
                return false;
            }
            *snap = Arc::new(snap.apply(event));
            true
        });
        if !applied {
            debug!(generation, "discarding superseded completion");
        }
        applied
    }
}
