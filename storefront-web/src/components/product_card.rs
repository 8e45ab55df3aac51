use storefront_core::Product;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub product: Product,
    pub on_add: Callback<Product>,
    #[prop_or(200)]
    pub image_height: u32,
    /// Recommendation tiles skip the description.
    #[prop_or_default]
    pub compact: bool,
}

#[function_component(ProductCard)]
pub fn product_card(props: &Props) -> Html {
    let on_click = {
        let on_add = props.on_add.clone();
        let product = props.product.clone();
        Callback::from(move |_| on_add.emit(product.clone()))
    };
    let product = &props.product;
    let class = classes!("product-card", props.compact.then_some("product-card--compact"));

    html! {
        <article class={class} data-product-id={product.id.to_string()}>
            <img
                class="product-card__image"
                src={product.image.clone()}
                alt={product.name.clone()}
                loading="lazy"
                style={format!("height: {}px; object-fit: cover;", props.image_height)}
            />
            <div class="product-card__body">
                <h3 class="product-card__title" title={product.name.clone()}>{ product.name.clone() }</h3>
                if !props.compact {
                    <p class="product-card__description">{ product.description.clone() }</p>
                }
                <span class="product-card__price">{ product.price.to_string() }</span>
            </div>
            <button
                type="button"
                class="product-card__add"
                aria-label={format!("Add {} to cart", product.name)}
                onclick={on_click}
            >
                {"Add to cart"}
            </button>
        </article>
    }
}
