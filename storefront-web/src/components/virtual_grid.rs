//! Windowed product grid.
//!
//! Row geometry comes from [`storefront_core::Viewport`]; this component only
//! measures the container, forwards scroll offsets, and materializes the rows
//! in the current window. Rows outside the window are unmounted.
use crate::dom::{self, EventListener};
use std::ops::Range;
use storefront_core::{LayoutConfig, RowDescriptor, Viewport};
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub layout: LayoutConfig,
    /// Products on the current page.
    pub item_count: usize,
    pub has_recommendations: bool,
    /// Changes whenever the rendered product set changes; resets scroll to the top.
    pub generation: u64,
    pub header: Html,
    /// Renders the page items in the given range as one row.
    pub render_row: Callback<Range<usize>, Html>,
    /// Content after the virtual rows (empty notice, pager).
    #[prop_or_default]
    pub footer: Html,
}

#[function_component(VirtualGrid)]
pub fn virtual_grid(props: &Props) -> Html {
    let container = use_node_ref();
    let viewport = use_mut_ref(|| Viewport::new(props.layout.clone()));
    let redraw = use_force_update();

    let reset = viewport.borrow_mut().set_content(
        props.item_count,
        props.has_recommendations,
        props.generation,
    );
    if reset {
        log::debug!("view generation {} reset grid scroll", props.generation);
    }

    {
        let container = container.clone();
        use_effect_with(props.generation, move |_| {
            if let Some(el) = container.cast::<Element>() {
                el.set_scroll_top(0);
            }
            || {}
        });
    }

    {
        let container = container.clone();
        let viewport = viewport.clone();
        let redraw = redraw.clone();
        let fallback_height = props.layout.initial_viewport_height;
        use_effect_with((), move |()| {
            let measure = move || {
                let Some(el) = container.cast::<Element>() else {
                    return;
                };
                let width = u32::try_from(el.client_width()).unwrap_or(0);
                let height = match u32::try_from(el.client_height()) {
                    Ok(0) | Err(_) => fallback_height,
                    Ok(height) => height,
                };
                viewport.borrow_mut().resize(width, height);
                redraw.force_update();
            };
            measure();
            let listener = EventListener::new(&dom::window(), "resize", move |_| measure())
                .map_err(|err| {
                    log::warn!("grid resize listener unavailable: {}", dom::js_error_message(&err));
                })
                .ok();
            move || drop(listener)
        });
    }

    let on_scroll = {
        let viewport = viewport.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: Event| {
            let Some(el) = e.target_dyn_into::<Element>() else {
                return;
            };
            let top = u32::try_from(el.scroll_top()).unwrap_or(0);
            let before = viewport.borrow().window().rows;
            viewport.borrow_mut().scroll_to(top);
            if viewport.borrow().window().rows != before {
                redraw.force_update();
            }
        })
    };

    let (window, layout) = {
        let viewport = viewport.borrow();
        (viewport.window(), viewport.layout())
    };
    let columns = layout.columns();

    let rows = window.rows.clone().filter_map(|index| {
        let row = layout.row(index)?;
        let placement = format!(
            "position: absolute; left: 0; right: 0; top: {}px; height: {}px;",
            layout.row_offset(index),
            layout.row_height(index)
        );
        Some(match row {
            RowDescriptor::Header => html! {
                <div key="header" class="virtual-grid__row virtual-grid__row--header" style={placement}>
                    { props.header.clone() }
                </div>
            },
            RowDescriptor::Products(range) => html! {
                <div
                    key={index.to_string()}
                    class="virtual-grid__row"
                    data-row={index.to_string()}
                    style={format!("{placement} display: grid; grid-template-columns: repeat({columns}, minmax(0, 1fr)); gap: 16px;")}
                >
                    { props.render_row.emit(range) }
                </div>
            },
        })
    });

    html! {
        <div
            ref={container}
            class="virtual-grid"
            data-columns={columns.to_string()}
            data-row-count={layout.row_count().to_string()}
            style="height: 80vh; overflow-y: auto; position: relative;"
            onscroll={on_scroll}
        >
            <div class="virtual-grid__spacer" style={format!("position: relative; height: {}px;", window.total_height)}>
                { for rows }
            </div>
            { props.footer.clone() }
        </div>
    }
}
