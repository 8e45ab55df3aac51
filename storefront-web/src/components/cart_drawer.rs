use storefront_core::{Cart, CartLine, MAX_LINE_QUANTITY, MIN_LINE_QUANTITY, ProductId};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub cart: Cart,
    pub on_close: Callback<()>,
    pub on_remove: Callback<ProductId>,
    pub on_quantity: Callback<(ProductId, u32)>,
    pub on_clear: Callback<()>,
}

fn cart_line(line: &CartLine, on_remove: &Callback<ProductId>, on_quantity: &Callback<(ProductId, u32)>) -> Html {
    let id = line.product.id;
    let remove = {
        let cb = on_remove.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id))
    };
    let change = {
        let cb = on_quantity.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            // Blank or non-numeric input is ignored; range is enforced by the cart.
            if let Ok(quantity) = input.value().trim().parse::<u32>()
                && quantity > 0
            {
                cb.emit((id, quantity));
            }
        })
    };

    html! {
        <li class="cart-line" key={id.to_string()}>
            <img class="cart-line__image" src={line.product.image.clone()} alt={line.product.name.clone()} width="80" height="80" />
            <div class="cart-line__details">
                <div class="cart-line__header">
                    <span class="cart-line__name" title={line.product.name.clone()}>{ line.product.name.clone() }</span>
                    <button type="button" class="cart-line__remove" aria-label={format!("Remove {}", line.product.name)} onclick={remove}>
                        {"✕"}
                    </button>
                </div>
                <span class="cart-line__unit">{ format!("Unit Price: {}", line.product.price) }</span>
                <div class="cart-line__footer">
                    <input
                        type="number"
                        class="cart-line__quantity"
                        aria-label="Quantity"
                        min={MIN_LINE_QUANTITY.to_string()}
                        max={MAX_LINE_QUANTITY.to_string()}
                        value={line.quantity.to_string()}
                        onchange={change}
                    />
                    <strong class="cart-line__subtotal">{ line.subtotal().to_string() }</strong>
                </div>
            </div>
        </li>
    }
}

#[function_component(CartDrawer)]
pub fn cart_drawer(props: &Props) -> Html {
    if !props.cart.open {
        return Html::default();
    }

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };
    let on_clear = {
        let cb = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let cart = &props.cart;

    html! {
        <div class="cart-drawer-backdrop" role="presentation">
            <aside
                class="cart-drawer"
                role="dialog"
                aria-modal="true"
                aria-labelledby="cart-drawer-title"
                onkeydown={on_keydown}
            >
                <header class="cart-drawer__header">
                    <h2 id="cart-drawer-title">{ format!("Shopping Cart ({} items)", cart.len()) }</h2>
                    <button type="button" class="cart-drawer__close" onclick={on_close}>{"Close"}</button>
                </header>
                if cart.is_empty() {
                    <p class="cart-drawer__empty">{"Your cart is empty"}</p>
                } else {
                    <ul class="cart-drawer__lines">
                        { for cart.lines.iter().map(|line| cart_line(line, &props.on_remove, &props.on_quantity)) }
                    </ul>
                    <footer class="cart-drawer__footer">
                        <strong class="cart-drawer__total">{ format!("Total: {}", cart.total()) }</strong>
                        <button type="button" class="cart-drawer__clear" onclick={on_clear}>{"Clear cart"}</button>
                        <button type="button" class="cart-drawer__checkout">{"Checkout"}</button>
                    </footer>
                }
            </aside>
        </div>
    }
}
