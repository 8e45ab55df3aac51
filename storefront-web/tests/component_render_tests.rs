use futures::executor::block_on;
use std::rc::Rc;
use storefront_core::{Action, Cart, Price, Product, SortOption, StorefrontState, demo_catalog};
use storefront_web::app::{Shell, StorefrontModel};
use storefront_web::components::cart_drawer::{self, CartDrawer};
use storefront_web::components::pagination::{self, Pagination};
use storefront_web::components::product_card::{self, ProductCard};
use storefront_web::components::product_filter::{ProductFilter, use_search_draft};
use storefront_web::components::product_list::ProductList;
use storefront_web::components::recommendations::{self, Recommendations};
use yew::prelude::*;
use yew::LocalServerRenderer;

fn product(id: u32, name: &str, cents: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: Price::from_cents(cents),
        description: format!("{name} description"),
        image: format!("https://img.example/{id}.jpg"),
    }
}

fn price_ladder() -> Vec<Product> {
    (1..=10)
        .map(|i| product(i, &format!("P{i}"), i64::from(i) * 1_000))
        .collect()
}

fn ready_state(products: Vec<Product>) -> StorefrontState {
    let mut state = StorefrontState::default();
    state.apply(Action::FetchStarted);
    state.apply(Action::FetchSucceeded(products));
    state
}

#[derive(Properties, PartialEq)]
struct HarnessProps {
    state: StorefrontState,
}

#[function_component(ListHarness)]
fn list_harness(props: &HarnessProps) -> Html {
    let initial = props.state.clone();
    let store = use_reducer(move || StorefrontModel::new(initial));
    html! { <ProductList store={store} on_retry={Callback::noop()} /> }
}

#[function_component(ShellHarness)]
fn shell_harness(props: &HarnessProps) -> Html {
    let initial = props.state.clone();
    let store = use_reducer(move || StorefrontModel::new(initial));
    html! { <Shell store={store} on_retry={Callback::noop()} /> }
}

fn render_list(state: StorefrontState) -> String {
    block_on(LocalServerRenderer::<ListHarness>::with_props(HarnessProps { state }).render())
}

#[test]
fn product_card_shows_name_and_price() {
    let props = product_card::Props {
        product: product(2, "Smartphone 15 Pro", 99_900),
        on_add: Callback::noop(),
        image_height: 200,
        compact: false,
    };
    let html = block_on(LocalServerRenderer::<ProductCard>::with_props(props).render());
    assert!(html.contains("Smartphone 15 Pro"));
    assert!(html.contains("$999.00"), "{html}");
    assert!(html.contains("Smartphone 15 Pro description"));
    assert!(html.contains("product-card__add"));
}

#[test]
fn recommendations_hide_when_empty() {
    let empty = recommendations::Props {
        products: Rc::new(Vec::new()),
        on_refresh: Callback::noop(),
        on_add: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Recommendations>::with_props(empty).render());
    assert!(!html.contains("You May Also Like"));

    let filled = recommendations::Props {
        products: Rc::new(vec![product(1, "VR Headset", 34_900)]),
        on_refresh: Callback::noop(),
        on_add: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Recommendations>::with_props(filled).render());
    assert!(html.contains("You May Also Like"));
    assert!(html.contains("Refresh Recommendations"));
    assert!(html.contains("VR Headset"));
}

#[derive(Properties, PartialEq)]
struct FilterHarnessProps {
    committed: AttrValue,
    sort: Option<SortOption>,
}

#[function_component(FilterHarness)]
fn filter_harness(props: &FilterHarnessProps) -> Html {
    let draft = use_search_draft(&props.committed, 500, Callback::noop());
    html! { <ProductFilter draft={draft} sort={props.sort} on_sort_change={Callback::noop()} /> }
}

#[test]
fn filter_marks_selected_sort() {
    let props = FilterHarnessProps {
        committed: AttrValue::from("cam"),
        sort: Some(SortOption::NameDesc),
    };
    let html = block_on(LocalServerRenderer::<FilterHarness>::with_props(props).render());
    assert!(html.contains("Search products..."));
    assert!(html.contains("value=\"cam\""), "{html}");
    assert!(html.contains("Name: Z to A"));
    assert!(html.contains("price_asc"));
}

#[test]
fn pagination_reports_range_and_hides_without_results() {
    let props = pagination::Props {
        current_page: 3,
        page_size: 4,
        total: 10,
        page_size_options: vec![10, 20, 50, 100],
        on_change: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Pagination>::with_props(props).render());
    assert!(html.contains("9-10 of 10"), "{html}");
    assert!(html.contains("pagination__page--active"));

    let none = pagination::Props {
        current_page: 1,
        page_size: 4,
        total: 0,
        page_size_options: vec![10],
        on_change: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Pagination>::with_props(none).render());
    assert!(!html.contains("pagination__range"));
}

#[test]
fn cart_drawer_lists_lines_and_total() {
    let mut cart = Cart::new();
    let mouse = product(12, "Wireless Mouse", 4_999);
    cart.add(&mouse);
    cart.add(&mouse);
    cart.open = true;
    let props = cart_drawer::Props {
        cart,
        on_close: Callback::noop(),
        on_remove: Callback::noop(),
        on_quantity: Callback::noop(),
        on_clear: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<CartDrawer>::with_props(props).render());
    assert!(html.contains("Shopping Cart (1 items)"));
    assert!(html.contains("Unit Price: $49.99"));
    assert!(html.contains("Total: $99.98"), "{html}");
}

#[test]
fn cart_drawer_closed_and_empty_states() {
    let closed = cart_drawer::Props {
        cart: Cart::new(),
        on_close: Callback::noop(),
        on_remove: Callback::noop(),
        on_quantity: Callback::noop(),
        on_clear: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<CartDrawer>::with_props(closed).render());
    assert!(!html.contains("cart-drawer__header"));

    let mut cart = Cart::new();
    cart.open = true;
    let open = cart_drawer::Props {
        cart,
        on_close: Callback::noop(),
        on_remove: Callback::noop(),
        on_quantity: Callback::noop(),
        on_clear: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<CartDrawer>::with_props(open).render());
    assert!(html.contains("Your cart is empty"));
}

#[test]
fn list_shows_loading_until_catalog_is_ready() {
    let html = render_list(StorefrontState::default());
    assert!(html.contains("Loading products..."));

    let mut loading = StorefrontState::default();
    loading.apply(Action::FetchStarted);
    let html = render_list(loading);
    assert!(html.contains("Loading products..."));
    assert!(!html.contains("Featured Products"));
}

#[test]
fn list_surfaces_fetch_failure() {
    let mut failed = StorefrontState::default();
    failed.apply(Action::FetchStarted);
    failed.apply(Action::FetchFailed("Failed to fetch products (HTTP 500)".into()));
    let html = render_list(failed);
    assert!(html.contains("role=\"alert\""));
    assert!(html.contains("Failed to fetch products (HTTP 500)"));
    assert!(html.contains("Retry"));
}

#[test]
fn list_renders_first_rows_in_sorted_order() {
    let mut state = ready_state(price_ladder());
    state.apply(Action::SetPageSize(4));
    state.apply(Action::SetSortOption(Some(SortOption::PriceDesc)));
    let html = render_list(state);

    assert!(html.contains("Featured Products"));
    assert!(html.contains("You May Also Like"));
    // Before measurement the grid uses one column, so row 1 holds the most expensive product.
    let (_, first_row) = html.split_once("data-row=\"1\"").expect("first product row");
    let first_card = first_row
        .split_once("data-product-id=\"")
        .and_then(|(_, rest)| rest.split_once('"'))
        .map(|(id, _)| id);
    assert_eq!(first_card, Some("10"));
    assert!(html.contains("1-4 of 10"));
}

#[test]
fn grid_renders_only_rows_in_the_window() {
    let html = render_list(ready_state(demo_catalog(4, 50)));

    // One column before measurement: header plus one row per product.
    assert!(html.contains("data-row-count=\"51\""), "{html}");
    // An 800px window over a 760px header and 480px rows, plus two rows of overscan.
    assert!(html.contains("data-row=\"1\""));
    assert!(html.contains("data-row=\"3\""));
    assert!(!html.contains("data-row=\"4\""));
    assert!(!html.contains("data-row=\"10\""));
    assert!(!html.contains("data-row=\"50\""));
    assert_eq!(html.matches("class=\"virtual-grid__row\"").count(), 3);
}

#[test]
fn list_distinguishes_empty_results() {
    let mut state = ready_state(price_ladder());
    state.apply(Action::SetSearchTerm("no such product".into()));
    let html = render_list(state);
    assert!(html.contains("No products match your search."));
    assert!(!html.contains("data-row=\"1\""));

    let mut state = ready_state(price_ladder());
    state.apply(Action::SetPageSize(4));
    state.apply(Action::SetCurrentPage(9));
    let html = render_list(state);
    assert!(html.contains("No products on this page."));
}

#[test]
fn shell_shows_cart_count() {
    let mut state = ready_state(price_ladder());
    state.apply(Action::AddToCart(product(1, "P1", 1_000)));
    state.apply(Action::AddToCart(product(1, "P1", 1_000)));
    let html = block_on(LocalServerRenderer::<ShellHarness>::with_props(HarnessProps { state }).render());
    assert!(html.contains("Cart (2)"));
    assert!(html.contains("Shopping Cart (1 items)"));
}
