//! Catalog store: the fetched product collection and its fetch status.
//!
//! A snapshot moves `Idle -> Loading -> Ready | Failed`. A failed snapshot may
//! be loaded again; a ready one is never replaced for the rest of the session.
use crate::product::{Product, ProductId};
use std::collections::HashSet;
use std::rc::Rc;
use thiserror::Error;

/// Fetch lifecycle of the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Result of asking the snapshot to start a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadGate {
    Start,
    AlreadyLoading,
    AlreadyLoaded,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to fetch products (HTTP {status})")]
    Http { status: u16 },
    #[error("Failed to fetch products: {0}")]
    Transport(String),
    #[error("Malformed catalog: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Malformed catalog: duplicate product id {id}")]
    DuplicateProduct { id: ProductId },
}

/// Source of catalog records. Platform crates provide the HTTP implementation.
pub trait CatalogSource {
    /// Fetch the full catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the payload cannot be decoded.
    #[allow(async_fn_in_trait)]
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Read-only view of the catalog plus its fetch status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    products: Rc<[Product]>,
    status: FetchStatus,
    error: Option<String>,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn status(&self) -> FetchStatus {
        self.status
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == FetchStatus::Ready
    }

    /// Whether a load may start now.
    #[must_use]
    pub const fn load_gate(&self) -> LoadGate {
        match self.status {
            FetchStatus::Loading => LoadGate::AlreadyLoading,
            FetchStatus::Ready => LoadGate::AlreadyLoaded,
            FetchStatus::Idle | FetchStatus::Failed => LoadGate::Start,
        }
    }

    /// Transition to `Loading` unless a load is in flight or already succeeded.
    pub fn begin_load(&mut self) -> LoadGate {
        let gate = self.load_gate();
        if gate == LoadGate::Start {
            self.status = FetchStatus::Loading;
            self.error = None;
        }
        gate
    }

    /// Replace the product sequence in one step and mark the snapshot ready.
    ///
    /// Only a snapshot in `Loading` accepts a result; returns whether it did.
    pub fn complete(&mut self, products: Vec<Product>) -> bool {
        if self.status != FetchStatus::Loading {
            return false;
        }
        self.products = Rc::from(products);
        self.status = FetchStatus::Ready;
        self.error = None;
        true
    }

    /// Record a failed load. Ignored unless a load is in flight.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.status != FetchStatus::Loading {
            return false;
        }
        self.status = FetchStatus::Failed;
        self.error = Some(message.into());
        true
    }
}

/// Reject catalogs that reuse a product id.
///
/// # Errors
///
/// Returns [`CatalogError::DuplicateProduct`] for the first repeated id.
pub fn validate_products(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateProduct { id: product.id });
        }
    }
    Ok(())
}

/// Decode and validate a JSON array of product records.
///
/// # Errors
///
/// Returns an error when the payload is not a product array or contains duplicate ids.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> = serde_json::from_str(json)?;
    validate_products(&products)?;
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;

    fn product(id: ProductId) -> Product {
        Product {
            id,
            name: format!("P{id}"),
            price: Price::from_cents(i64::from(id) * 100),
            description: String::new(),
            image: String::new(),
        }
    }

    #[test]
    fn lifecycle_moves_through_loading_to_ready() {
        let mut snapshot = CatalogSnapshot::new();
        assert_eq!(snapshot.status(), FetchStatus::Idle);
        assert_eq!(snapshot.begin_load(), LoadGate::Start);
        assert_eq!(snapshot.begin_load(), LoadGate::AlreadyLoading);
        assert!(snapshot.products().is_empty());

        snapshot.complete(vec![product(1), product(2)]);
        assert!(snapshot.is_ready());
        assert_eq!(snapshot.products().len(), 2);
        assert_eq!(snapshot.begin_load(), LoadGate::AlreadyLoaded);
    }

    #[test]
    fn failed_snapshot_keeps_message_and_allows_retry() {
        let mut snapshot = CatalogSnapshot::new();
        snapshot.begin_load();
        snapshot.fail("Failed to fetch products (HTTP 503)");
        assert_eq!(snapshot.status(), FetchStatus::Failed);
        assert_eq!(snapshot.error(), Some("Failed to fetch products (HTTP 503)"));

        assert_eq!(snapshot.begin_load(), LoadGate::Start);
        assert!(snapshot.error().is_none());
    }

    #[test]
    fn results_outside_a_load_are_ignored() {
        let mut snapshot = CatalogSnapshot::new();
        assert!(!snapshot.complete(vec![product(9)]));
        assert_eq!(snapshot.status(), FetchStatus::Idle);

        snapshot.begin_load();
        assert!(snapshot.complete(vec![product(1)]));
        assert!(!snapshot.complete(vec![product(2), product(3)]));
        assert!(!snapshot.fail("late"));
        assert!(snapshot.is_ready());
        assert_eq!(snapshot.products()[0].id, 1);
        assert!(snapshot.error().is_none());
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let err = validate_products(&[product(1), product(2), product(1)]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct { id: 1 }));
    }

    #[test]
    fn parse_catalog_surfaces_decode_errors() {
        assert!(matches!(
            parse_catalog("{\"not\":\"an array\"}"),
            Err(CatalogError::Decode(_))
        ));
        let ok = parse_catalog(
            r#"[{"id":1,"name":"A","price":1.5,"description":"d","image":"i"}]"#,
        )
        .unwrap();
        assert_eq!(ok[0].price.cents(), 150);
    }
}
