use storefront_core::total_pages;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Pages shown on each side of the current one before collapsing into a gap.
const SIBLINGS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Gap,
}

/// Page buttons to show: first, last, and a window around `current`.
#[must_use]
pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let low = current.saturating_sub(SIBLINGS).max(1);
    let high = (current + SIBLINGS).min(total);

    let mut items = Vec::new();
    if low > 1 {
        items.push(PageItem::Page(1));
        if low > 2 {
            items.push(PageItem::Gap);
        }
    }
    items.extend((low..=high).map(PageItem::Page));
    if high < total {
        if high + 1 < total {
            items.push(PageItem::Gap);
        }
        items.push(PageItem::Page(total));
    }
    items
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub current_page: usize,
    pub page_size: usize,
    /// Number of products matching the current search.
    pub total: usize,
    pub page_size_options: Vec<usize>,
    /// Emits `(page, page_size)` together.
    pub on_change: Callback<(usize, usize)>,
}

#[function_component(Pagination)]
pub fn pagination(props: &Props) -> Html {
    if props.total == 0 {
        return Html::default();
    }

    let pages = total_pages(props.total, props.page_size);
    let current = props.current_page;
    let page_size = props.page_size;

    let go_to = |page: usize| {
        let cb = props.on_change.clone();
        Callback::from(move |_: MouseEvent| cb.emit((page, page_size)))
    };

    let on_size = {
        let cb = props.on_change.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            if let Ok(size) = select.value().parse::<usize>() {
                cb.emit((current, size));
            }
        })
    };

    let first = current.saturating_sub(1).saturating_mul(page_size) + 1;
    let last = current.saturating_mul(page_size).min(props.total);
    let range_label = if first > props.total {
        format!("0 of {}", props.total)
    } else {
        format!("{first}-{last} of {}", props.total)
    };

    html! {
        <nav class="pagination" aria-label="Pagination">
            <span class="pagination__range">{ range_label }</span>
            <button
                type="button"
                class="pagination__prev"
                aria-label="Previous page"
                disabled={current <= 1}
                onclick={go_to(current.saturating_sub(1).max(1))}
            >
                {"‹"}
            </button>
            { for page_items(current, pages).into_iter().map(|item| match item {
                PageItem::Page(page) => html! {
                    <button
                        type="button"
                        class={classes!("pagination__page", (page == current).then_some("pagination__page--active"))}
                        aria-current={(page == current).then_some("page")}
                        onclick={go_to(page)}
                    >
                        { page.to_string() }
                    </button>
                },
                PageItem::Gap => html! { <span class="pagination__gap">{"…"}</span> },
            }) }
            <button
                type="button"
                class="pagination__next"
                aria-label="Next page"
                disabled={current >= pages}
                onclick={go_to((current + 1).min(pages))}
            >
                {"›"}
            </button>
            <select class="pagination__size" aria-label="Items per page" onchange={on_size}>
                { for props.page_size_options.iter().map(|&size| html! {
                    <option value={size.to_string()} selected={size == page_size}>
                        { format!("{size} / page") }
                    </option>
                }) }
            </select>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Gap, Page};

    #[test]
    fn short_ranges_list_every_page() {
        assert_eq!(page_items(1, 1), vec![Page(1)]);
        assert_eq!(page_items(2, 4), vec![Page(1), Page(2), Page(3), Page(4)]);
    }

    #[test]
    fn long_ranges_collapse_into_gaps() {
        assert_eq!(
            page_items(10, 20),
            vec![Page(1), Gap, Page(8), Page(9), Page(10), Page(11), Page(12), Gap, Page(20)]
        );
        assert_eq!(page_items(1, 20), vec![Page(1), Page(2), Page(3), Gap, Page(20)]);
        assert_eq!(page_items(4, 7), vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]);
    }

    #[test]
    fn out_of_range_current_is_clamped_for_display() {
        assert_eq!(page_items(9, 3), vec![Page(1), Page(2), Page(3)]);
    }
}
