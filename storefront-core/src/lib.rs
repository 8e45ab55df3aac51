//! Storefront Engine
//!
//! Platform-agnostic core of the product-list storefront: catalog loading,
//! search/sort/pagination state, the derivation pipeline, seeded
//! recommendations, debounced search and virtual grid layout.
//! This crate has no UI or browser dependencies.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod fixtures;
pub mod pipeline;
pub mod price;
pub mod product;
pub mod query;
pub mod recommend;
pub mod store;
pub mod viewport;

// Re-export commonly used types
pub use cart::{Cart, CartLine, MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};
pub use catalog::{
    CatalogError, CatalogSnapshot, CatalogSource, FetchStatus, LoadGate, parse_catalog,
    validate_products,
};
pub use config::{Breakpoint, ConfigError, LayoutConfig, StorefrontConfig};
pub use debounce::{Debouncer, SEARCH_QUIET_PERIOD, Ticket};
pub use fixtures::{base_products, demo_catalog};
pub use pipeline::{CatalogView, derive_view, filter_products, paginate, sort_products};
pub use price::Price;
pub use product::{Product, ProductId};
pub use query::{FIRST_PAGE, QueryState, SortOption, UnknownSortOption, total_pages};
pub use recommend::{DEFAULT_RECOMMENDATION_COUNT, recommendations, shuffled_indices};
pub use store::{
    Action, LoadOutcome, Store, StorefrontState, SubscriptionId, fetch_catalog, reduce,
};
pub use viewport::{GridLayout, HEADER_ROW, RowDescriptor, Viewport, ViewportWindow, columns_for_width};
