use crate::components::{CartDrawer, ProductList};
use storefront_core::{Action, ProductId};
use yew::prelude::*;

pub mod bootstrap;
pub mod state;

pub use state::{StorefrontHandle, StorefrontModel, app_config, use_storefront};

#[derive(Properties, PartialEq, Clone)]
pub struct ShellProps {
    pub store: StorefrontHandle,
    pub on_retry: Callback<()>,
}

/// Page chrome around the product list and cart drawer.
#[function_component(Shell)]
pub fn shell(props: &ShellProps) -> Html {
    let store = props.store.clone();

    let open_cart = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::SetCartOpen(true)))
    };
    let on_close = {
        let store = store.clone();
        Callback::from(move |()| store.dispatch(Action::SetCartOpen(false)))
    };
    let on_remove = {
        let store = store.clone();
        Callback::from(move |id: ProductId| store.dispatch(Action::RemoveFromCart(id)))
    };
    let on_quantity = {
        let store = store.clone();
        Callback::from(move |(id, quantity): (ProductId, u32)| {
            store.dispatch(Action::UpdateQuantity { id, quantity });
        })
    };
    let on_clear = {
        let store = store.clone();
        Callback::from(move |()| store.dispatch(Action::ClearCart))
    };

    html! {
        <div class="storefront">
            <header class="storefront__header">
                <span class="storefront__logo">{"E-Shop"}</span>
                <nav class="storefront__nav">
                    <span class="storefront__nav-item storefront__nav-item--active">{"Products"}</span>
                    <button type="button" class="storefront__nav-item storefront__cart-button" onclick={open_cart}>
                        { format!("Cart ({})", store.cart.item_count()) }
                    </button>
                </nav>
            </header>
            <main class="storefront__content">
                <ProductList store={store.clone()} on_retry={props.on_retry.clone()} />
            </main>
            <footer class="storefront__footer">{"E-Shop"}</footer>
            <CartDrawer
                cart={store.cart.clone()}
                on_close={on_close}
                on_remove={on_remove}
                on_quantity={on_quantity}
                on_clear={on_clear}
            />
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_storefront();
    bootstrap::use_catalog_bootstrap(&store);
    let on_retry = bootstrap::use_retry_callback(&store);

    html! { <Shell store={store} on_retry={on_retry} /> }
}
