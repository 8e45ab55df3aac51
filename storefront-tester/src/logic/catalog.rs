//! Catalog inputs for logic runs: a JSON file on disk or the seeded demo generator.
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use storefront_core::{
    CatalogError, CatalogSource, LoadOutcome, Product, Store, StorefrontConfig, demo_catalog,
    parse_catalog,
};

pub const DEFAULT_GENERATED_COUNT: usize = 100;

/// Reads the catalog from a local JSON file shaped like the products endpoint.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| CatalogError::Transport(format!("{}: {err}", self.path.display())))?;
        parse_catalog(&json)
    }
}

/// Where each iteration gets its products from.
#[derive(Debug, Clone)]
pub enum CatalogPlan {
    /// Fresh demo catalog per iteration, jittered by the iteration seed.
    Generated { count: usize },
    /// The same validated catalog for every iteration.
    Fixed(Rc<[Product]>),
}

impl Default for CatalogPlan {
    fn default() -> Self {
        Self::Generated {
            count: DEFAULT_GENERATED_COUNT,
        }
    }
}

impl CatalogPlan {
    /// Load a fixed plan through the engine store so the file passes the same
    /// validation as a network fetch.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let source = FileCatalogSource::new(path);
        let store = Store::with_config(StorefrontConfig::default());
        match store.load_catalog(&source).await {
            LoadOutcome::Ready { products } => {
                log::info!("loaded {products} products from {}", path.display());
                Ok(Self::Fixed(Rc::from(store.state().catalog.products())))
            }
            LoadOutcome::Failed(message) => {
                anyhow::bail!("failed to load catalog {}: {message}", path.display())
            }
            LoadOutcome::Skipped(gate) => {
                anyhow::bail!("catalog load for {} was skipped ({gate:?})", path.display())
            }
        }
    }

    pub fn products_for(&self, seed: u64) -> Vec<Product> {
        match self {
            Self::Generated { count } => demo_catalog(seed, *count),
            Self::Fixed(products) => products.to_vec(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Generated { count } => format!("generated ({count} products)"),
            Self::Fixed(products) => format!("file ({} products)", products.len()),
        }
    }
}
