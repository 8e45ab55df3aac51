use once_cell::sync::Lazy;
use std::ops::Deref;
use std::rc::Rc;
use storefront_core::{Action, StorefrontConfig, StorefrontState, reduce};
use yew::prelude::*;

static CONFIG: Lazy<StorefrontConfig> = Lazy::new(StorefrontConfig::load_from_static);

/// Configuration bundled with the app.
#[must_use]
pub fn app_config() -> &'static StorefrontConfig {
    &CONFIG
}

/// Yew-side wrapper so the core reducer can drive `use_reducer`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StorefrontModel(StorefrontState);

impl StorefrontModel {
    #[must_use]
    pub const fn new(state: StorefrontState) -> Self {
        Self(state)
    }

    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self(StorefrontState::new(Rc::new(config.clone())))
    }
}

impl Deref for StorefrontModel {
    type Target = StorefrontState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for StorefrontModel {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self(reduce(&self.0, action)))
    }
}

pub type StorefrontHandle = UseReducerHandle<StorefrontModel>;

#[hook]
pub fn use_storefront() -> StorefrontHandle {
    use_reducer(|| StorefrontModel::from_config(app_config()))
}
