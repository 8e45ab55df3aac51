use crate::app::state::StorefrontHandle;
use crate::components::pagination::Pagination;
use crate::components::product_card::ProductCard;
use crate::components::product_filter::{ProductFilter, use_search_draft};
use crate::components::recommendations::Recommendations;
use crate::components::virtual_grid::VirtualGrid;
use std::ops::Range;
use std::rc::Rc;
use storefront_core::{Action, FetchStatus, Product, SortOption};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub store: StorefrontHandle,
    pub on_retry: Callback<()>,
}

fn loading_view() -> Html {
    html! {
        <div class="product-list__loading" role="status" aria-live="polite">
            <span class="spinner" aria-hidden="true"></span>
            <span>{"Loading products..."}</span>
        </div>
    }
}

fn failed_view(message: &str, on_retry: &Callback<()>) -> Html {
    let retry = {
        let cb = on_retry.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <div class="alert alert--error" role="alert">
            <strong class="alert__title">{"Error"}</strong>
            <p class="alert__message">{ message.to_string() }</p>
            <button type="button" class="alert__retry" onclick={retry}>{"Retry"}</button>
        </div>
    }
}

/// Title, recommendations, filters, and the virtualized page of products.
#[function_component(ProductList)]
pub fn product_list(props: &Props) -> Html {
    let store = props.store.clone();

    let view = {
        let store = store.clone();
        use_memo(
            (store.catalog_revision, store.view_generation),
            move |_| store.view(),
        )
    };
    let picks = {
        let store = store.clone();
        use_memo(
            (store.catalog_revision, store.recommendation_seed),
            move |_| store.recommendations(),
        )
    };

    let on_add = {
        let store = store.clone();
        Callback::from(move |product: Product| store.dispatch(Action::AddToCart(product)))
    };
    let on_refresh = {
        let store = store.clone();
        Callback::from(move |()| store.dispatch(Action::RefreshRecommendations))
    };
    let on_search = {
        let store = store.clone();
        Callback::from(move |term: String| store.dispatch(Action::SetSearchTerm(term)))
    };
    // Lives here rather than in the filter: the grid unmounts the header row
    // once it scrolls out of the window.
    let draft = use_search_draft(
        &store.query.search_term,
        store.config.search_debounce_ms,
        on_search,
    );
    let on_sort_change = {
        let store = store.clone();
        Callback::from(move |sort: Option<SortOption>| store.dispatch(Action::SetSortOption(sort)))
    };
    let on_page_change = {
        let store = store.clone();
        Callback::from(move |(page, page_size): (usize, usize)| {
            store.dispatch(Action::ChangePage { page, page_size });
        })
    };
    let render_row = {
        let view = view.clone();
        let on_add = on_add.clone();
        Callback::from(move |range: Range<usize>| {
            let items = view.items.get(range).unwrap_or_default();
            html! {
                { for items.iter().map(|product| html! {
                    <ProductCard key={product.id.to_string()} product={product.clone()} on_add={on_add.clone()} />
                }) }
            }
        })
    };

    match store.catalog.status() {
        FetchStatus::Idle | FetchStatus::Loading => return loading_view(),
        FetchStatus::Failed => {
            return failed_view(store.catalog.error().unwrap_or("Unknown error"), &props.on_retry);
        }
        FetchStatus::Ready => {}
    }

    let config = Rc::clone(&store.config);
    let header = html! {
        <div class="product-list__header">
            <h1 class="product-list__title">{"Featured Products"}</h1>
            <Recommendations products={picks.clone()} on_refresh={on_refresh} on_add={on_add.clone()} />
            <ProductFilter
                draft={draft}
                sort={store.query.sort}
                on_sort_change={on_sort_change}
            />
        </div>
    };
    let footer = html! {
        <>
            if view.is_empty() {
                <div class="product-list__empty" role="status">
                    if view.matched == 0 {
                        {"No products match your search."}
                    } else {
                        {"No products on this page."}
                    }
                </div>
            }
            <Pagination
                current_page={view.page}
                page_size={view.page_size}
                total={view.matched}
                page_size_options={config.page_size_options.clone()}
                on_change={on_page_change}
            />
        </>
    };

    html! {
        <section class="product-list">
            <VirtualGrid
                layout={config.layout.clone()}
                item_count={view.items.len()}
                has_recommendations={!picks.is_empty()}
                generation={store.view_generation}
                header={header}
                render_row={render_row}
                footer={footer}
            />
        </section>
    }
}
