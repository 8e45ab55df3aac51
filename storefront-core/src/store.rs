//! Observable storefront state.
//!
//! [`StorefrontState`] is the single source of truth. Every change goes through
//! an [`Action`] and the pure [`reduce`] function. [`Store`] wraps the state for
//! callers that are not driven by a UI framework: it notifies subscribers
//! after each dispatch and memoises the derived catalog view so that readers
//! get the same `Rc` until catalog or query inputs change.
use crate::cart::Cart;
use crate::catalog::{CatalogSnapshot, CatalogSource, LoadGate, validate_products};
use crate::config::StorefrontConfig;
use crate::pipeline::{CatalogView, derive_view, filter_products};
use crate::product::{Product, ProductId};
use crate::query::{QueryState, SortOption};
use crate::recommend::recommendations;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchStarted,
    FetchSucceeded(Vec<Product>),
    FetchFailed(String),
    SetSearchTerm(String),
    SetSortOption(Option<SortOption>),
    SetPageSize(usize),
    SetCurrentPage(usize),
    /// Pager event carrying both values; size applies before the page is validated.
    ChangePage { page: usize, page_size: usize },
    RefreshRecommendations,
    AddToCart(Product),
    RemoveFromCart(ProductId),
    UpdateQuantity { id: ProductId, quantity: u32 },
    ClearCart,
    SetCartOpen(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontState {
    pub config: Rc<StorefrontConfig>,
    pub catalog: CatalogSnapshot,
    pub query: QueryState,
    pub recommendation_seed: u64,
    pub cart: Cart,
    /// Bumped whenever the set or order of rendered products may change.
    pub view_generation: u64,
    /// Bumped when the catalog snapshot is replaced.
    pub catalog_revision: u64,
}

impl Default for StorefrontState {
    fn default() -> Self {
        Self::new(Rc::new(StorefrontConfig::default()))
    }
}

impl StorefrontState {
    #[must_use]
    pub fn new(config: Rc<StorefrontConfig>) -> Self {
        let query = QueryState::with_page_size(config.default_page_size);
        Self {
            config,
            catalog: CatalogSnapshot::new(),
            query,
            recommendation_seed: 0,
            cart: Cart::new(),
            view_generation: 0,
            catalog_revision: 0,
        }
    }

    /// Apply one action in place.
    pub fn apply(&mut self, action: Action) {
        log::debug!("storefront action: {}", action_label(&action));
        match action {
            Action::FetchStarted => {
                let gate = self.catalog.begin_load();
                if gate != LoadGate::Start {
                    log::debug!("catalog load ignored: {gate:?}");
                }
            }
            Action::FetchSucceeded(products) => {
                let count = products.len();
                if self.catalog.complete(products) {
                    self.catalog_revision += 1;
                    self.bump_view();
                } else {
                    log::debug!(
                        "catalog result of {count} products ignored: status {:?}",
                        self.catalog.status()
                    );
                }
            }
            Action::FetchFailed(message) => {
                if self.catalog.fail(message.clone()) {
                    log::warn!("catalog fetch failed: {message}");
                } else {
                    log::debug!(
                        "catalog failure ignored: status {:?}: {message}",
                        self.catalog.status()
                    );
                }
            }
            Action::SetSearchTerm(term) => {
                self.query.set_search_term(term);
                self.bump_view();
            }
            Action::SetSortOption(sort) => {
                self.query.set_sort_option(sort);
                self.bump_view();
            }
            Action::SetPageSize(size) => {
                let clamped = self.config.clamp_page_size(size);
                if clamped != size {
                    log::debug!("page size {size} clamped to {clamped}");
                }
                self.query.set_page_size(clamped);
                self.bump_view();
            }
            Action::SetCurrentPage(page) => {
                self.query.set_current_page(page);
                self.bump_view();
            }
            Action::ChangePage { page, page_size } => {
                let page_size = self.config.clamp_page_size(page_size);
                let matched = self.matched_count();
                self.query.change_page(page, page_size, matched);
                self.bump_view();
            }
            Action::RefreshRecommendations => {
                self.recommendation_seed = self.recommendation_seed.wrapping_add(1);
            }
            Action::AddToCart(product) => {
                self.cart.add(&product);
                self.cart.open = true;
            }
            Action::RemoveFromCart(id) => self.cart.remove(id),
            Action::UpdateQuantity { id, quantity } => self.cart.update_quantity(id, quantity),
            Action::ClearCart => self.cart.clear(),
            Action::SetCartOpen(open) => self.cart.open = open,
        }
    }

    /// Number of products passing the current search filter.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        filter_products(self.catalog.products(), &self.query.search_term).len()
    }

    /// The current page of the filtered, sorted catalog.
    #[must_use]
    pub fn view(&self) -> CatalogView {
        derive_view(self.catalog.products(), &self.query)
    }

    #[must_use]
    pub fn recommendations(&self) -> Vec<Product> {
        recommendations(
            self.catalog.products(),
            self.recommendation_seed,
            self.config.recommendation_count,
        )
    }

    fn bump_view(&mut self) {
        self.view_generation = self.view_generation.wrapping_add(1);
    }
}

/// Pure reducer: the state after `action`.
#[must_use]
pub fn reduce(state: &StorefrontState, action: Action) -> StorefrontState {
    let mut next = state.clone();
    next.apply(action);
    next
}

fn action_label(action: &Action) -> String {
    match action {
        Action::FetchSucceeded(products) => format!("FetchSucceeded({} products)", products.len()),
        Action::AddToCart(product) => format!("AddToCart({})", product.id),
        other => format!("{other:?}"),
    }
}

/// Run the remote fetch and turn its result into the action that records it.
pub async fn fetch_catalog<S: CatalogSource>(source: &S) -> Action {
    match source.fetch().await {
        Ok(products) => match validate_products(&products) {
            Ok(()) => Action::FetchSucceeded(products),
            Err(err) => Action::FetchFailed(err.to_string()),
        },
        Err(err) => Action::FetchFailed(err.to_string()),
    }
}

/// What a call to [`Store::load_catalog`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready { products: usize },
    Failed(String),
    Skipped(LoadGate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&StorefrontState)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewKey {
    catalog_revision: u64,
    view_generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecommendationKey {
    catalog_revision: u64,
    seed: u64,
}

/// Single-threaded observable container around [`StorefrontState`].
pub struct Store {
    state: RefCell<Rc<StorefrontState>>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<u64>,
    view_cache: RefCell<Option<(ViewKey, Rc<CatalogView>)>>,
    recommendation_cache: RefCell<Option<(RecommendationKey, Rc<[Product]>)>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StorefrontState::default())
    }
}

impl Store {
    #[must_use]
    pub fn new(state: StorefrontState) -> Self {
        Self {
            state: RefCell::new(Rc::new(state)),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            view_cache: RefCell::new(None),
            recommendation_cache: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn with_config(config: StorefrontConfig) -> Self {
        Self::new(StorefrontState::new(Rc::new(config)))
    }

    /// Latest committed state.
    #[must_use]
    pub fn state(&self) -> Rc<StorefrontState> {
        Rc::clone(&self.state.borrow())
    }

    /// Reduce `action` into the state, then notify subscribers in subscription order.
    pub fn dispatch(&self, action: Action) {
        let next = Rc::new(reduce(&self.state.borrow(), action));
        *self.state.borrow_mut() = Rc::clone(&next);
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&StorefrontState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// The derived view, recomputed only when catalog or query changed.
    #[must_use]
    pub fn view(&self) -> Rc<CatalogView> {
        let state = self.state();
        let key = ViewKey {
            catalog_revision: state.catalog_revision,
            view_generation: state.view_generation,
        };
        if let Some((cached_key, view)) = self.view_cache.borrow().as_ref()
            && *cached_key == key
        {
            return Rc::clone(view);
        }
        let view = Rc::new(state.view());
        *self.view_cache.borrow_mut() = Some((key, Rc::clone(&view)));
        view
    }

    /// Seeded recommendations, recomputed only when catalog or seed changed.
    #[must_use]
    pub fn recommendations(&self) -> Rc<[Product]> {
        let state = self.state();
        let key = RecommendationKey {
            catalog_revision: state.catalog_revision,
            seed: state.recommendation_seed,
        };
        if let Some((cached_key, picks)) = self.recommendation_cache.borrow().as_ref()
            && *cached_key == key
        {
            return Rc::clone(picks);
        }
        let picks: Rc<[Product]> = Rc::from(state.recommendations());
        *self.recommendation_cache.borrow_mut() = Some((key, Rc::clone(&picks)));
        picks
    }

    /// Fetch the catalog from `source` unless a load is in flight or done.
    ///
    /// Fetch errors never propagate: they land in the snapshot as a failed
    /// status with a message, and the caller may simply call this again.
    pub async fn load_catalog<S: CatalogSource>(&self, source: &S) -> LoadOutcome {
        let gate = self.state.borrow().catalog.load_gate();
        if gate != LoadGate::Start {
            log::debug!("catalog load skipped: {gate:?}");
            return LoadOutcome::Skipped(gate);
        }
        self.dispatch(Action::FetchStarted);
        let action = fetch_catalog(source).await;
        let outcome = match &action {
            Action::FetchSucceeded(products) => LoadOutcome::Ready {
                products: products.len(),
            },
            Action::FetchFailed(message) => LoadOutcome::Failed(message.clone()),
            _ => LoadOutcome::Skipped(gate),
        };
        self.dispatch(action);
        outcome
    }
}
