//! Browser catalog source.
use crate::dom;
use storefront_core::{CatalogError, CatalogSource, Product};

/// Fetches the product array from the storefront API with `window.fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCatalogSource {
    endpoint: String,
}

impl HttpCatalogSource {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CatalogSource for HttpCatalogSource {
    #[allow(clippy::future_not_send)]
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        log::info!("fetching catalog from {}", self.endpoint);
        let response = dom::fetch_response(&self.endpoint)
            .await
            .map_err(|err| CatalogError::Transport(dom::js_error_message(&err)))?;

        if !response.ok() {
            return Err(CatalogError::Http {
                status: response.status(),
            });
        }

        let body = dom::response_text(&response)
            .await
            .map_err(|err| CatalogError::Transport(dom::js_error_message(&err)))?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        log::info!("catalog fetched: {} products", products.len());
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_kept_verbatim() {
        let source = HttpCatalogSource::new("http://localhost:3001/api/products");
        assert_eq!(source.endpoint(), "http://localhost:3001/api/products");
    }
}
