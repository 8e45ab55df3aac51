use crate::components::product_card::ProductCard;
use std::rc::Rc;
use storefront_core::Product;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub products: Rc<Vec<Product>>,
    pub on_refresh: Callback<()>,
    pub on_add: Callback<Product>,
}

/// "You May Also Like" strip. Renders nothing for an empty catalog.
#[function_component(Recommendations)]
pub fn recommendations(props: &Props) -> Html {
    if props.products.is_empty() {
        return Html::default();
    }

    let on_refresh = {
        let cb = props.on_refresh.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="recommendations" aria-label="Recommended products">
            <div class="recommendations__header">
                <h2 class="recommendations__title">{"You May Also Like"}</h2>
                <button
                    type="button"
                    class="recommendations__refresh"
                    title="Refresh Recommendations"
                    aria-label="Refresh Recommendations"
                    onclick={on_refresh}
                >
                    {"↻"}
                </button>
            </div>
            <div class="recommendations__grid">
                { for props.products.iter().map(|product| html! {
                    <ProductCard
                        key={format!("rec-{}", product.id)}
                        product={product.clone()}
                        on_add={props.on_add.clone()}
                        image_height={160}
                        compact=true
                    />
                }) }
            </div>
        </section>
    }
}
