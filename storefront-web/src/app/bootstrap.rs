use crate::app::state::{StorefrontHandle, app_config};
#[cfg(target_arch = "wasm32")]
use crate::catalog::HttpCatalogSource;
use storefront_core::{Action, LoadGate};
use yew::prelude::*;

/// Start a catalog fetch unless one is in flight or already succeeded.
///
/// Returns the gate decision so callers can tell a started load from a no-op.
pub fn start_catalog_load(store: &StorefrontHandle) -> LoadGate {
    let gate = store.catalog.load_gate();
    if gate != LoadGate::Start {
        log::debug!("catalog load not started: {gate:?}");
        return gate;
    }
    store.dispatch(Action::FetchStarted);
    spawn_fetch(store.clone(), app_config().endpoint.clone());
    gate
}

#[cfg(target_arch = "wasm32")]
fn spawn_fetch(store: StorefrontHandle, endpoint: String) {
    wasm_bindgen_futures::spawn_local(async move {
        let source = HttpCatalogSource::new(endpoint);
        let action = storefront_core::fetch_catalog(&source).await;
        store.dispatch(action);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_fetch(_store: StorefrontHandle, endpoint: String) {
    log::debug!("catalog fetch from {endpoint} skipped outside the browser");
}

/// Kick off the initial catalog load once the app mounts.
#[hook]
pub fn use_catalog_bootstrap(store: &StorefrontHandle) {
    let store = store.clone();
    use_effect_with((), move |()| {
        start_catalog_load(&store);
        || {}
    });
}

/// Callback that retries a failed load.
#[hook]
pub fn use_retry_callback(store: &StorefrontHandle) -> Callback<()> {
    let store = store.clone();
    use_callback(store, |(), store| {
        start_catalog_load(store);
    })
}
