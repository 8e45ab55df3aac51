//! Demo catalog data.
//!
//! The base records ship as a static asset alongside the web bundle. The
//! generator cycles through them to build catalogs of any size with a
//! reproducible price jitter.
use crate::catalog::{CatalogError, parse_catalog};
use crate::price::Price;
use crate::product::{Product, ProductId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const DEFAULT_PRODUCTS_DATA: &str =
    include_str!("../../storefront-web/static/assets/data/products.json");

/// Lower and upper bound of the price multiplier applied to generated records.
pub const PRICE_VARIATION: (f64, f64) = (0.8, 1.2);

/// Parse the bundled base records.
///
/// # Errors
///
/// Returns an error if the bundled asset is malformed.
pub fn try_base_products() -> Result<Vec<Product>, CatalogError> {
    parse_catalog(DEFAULT_PRODUCTS_DATA)
}

/// The bundled base records, or an empty list if the asset fails to parse.
#[must_use]
pub fn base_products() -> Vec<Product> {
    try_base_products().unwrap_or_else(|err| {
        log::error!("bundled product data is invalid: {err}");
        Vec::new()
    })
}

/// Build `count` products cycling over the base records.
///
/// Product `i` (zero-based) gets id `i + 1`, the base name suffixed with its
/// cycle number, and a price jittered within [`PRICE_VARIATION`].
#[must_use]
pub fn demo_catalog(seed: u64, count: usize) -> Vec<Product> {
    generate(&base_products(), seed, count)
}

/// Same as [`demo_catalog`] over caller-supplied base records.
#[must_use]
pub fn generate(base: &[Product], seed: u64, count: usize) -> Vec<Product> {
    if base.is_empty() {
        return Vec::new();
    }
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let template = &base[i % base.len()];
            let cycle = i / base.len() + 1;
            let factor = rng.gen_range(PRICE_VARIATION.0..PRICE_VARIATION.1);
            let price = Price::from_decimal(template.price.as_decimal() * factor)
                .unwrap_or(template.price);
            Product {
                id: ProductId::try_from(i + 1).unwrap_or(ProductId::MAX),
                name: format!("{} {cycle}", template.name),
                price,
                description: template.description.clone(),
                image: template.image.clone(),
            }
        })
        .collect()
}
