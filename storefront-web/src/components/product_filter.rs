use crate::dom::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use storefront_core::{Debouncer, SortOption};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Search box text plus its pending debounced commit.
///
/// Owned by a component that outlives the filter row, so a pending commit
/// survives the filter being unmounted by the virtual grid.
#[derive(Clone)]
pub struct SearchDraft {
    debouncer: Rc<RefCell<Debouncer>>,
    timer: Rc<RefCell<Option<Timeout>>>,
    visible: UseStateHandle<String>,
    quiet_period_ms: u32,
    on_commit: Callback<String>,
}

impl PartialEq for SearchDraft {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.debouncer, &other.debouncer)
            && self.visible == other.visible
            && self.on_commit == other.on_commit
    }
}

impl SearchDraft {
    /// Text the search box shows.
    #[must_use]
    pub fn value(&self) -> String {
        (*self.visible).clone()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.borrow().is_pending()
    }

    /// Keystroke: show `value` now, commit it after the quiet period.
    pub fn input(&self, value: String) {
        let ticket = self.debouncer.borrow_mut().input(value.clone());
        let Some(ticket) = ticket else {
            return;
        };
        self.visible.set(value);

        let fire = {
            let debouncer = self.debouncer.clone();
            let on_commit = self.on_commit.clone();
            move || {
                let committed = debouncer.borrow_mut().fire(ticket);
                if let Some(term) = committed {
                    on_commit.emit(term);
                }
            }
        };
        match Timeout::new(self.quiet_period_ms, fire) {
            Ok(armed) => *self.timer.borrow_mut() = Some(armed),
            Err(err) => {
                log::warn!(
                    "search debounce timer unavailable, committing now: {}",
                    crate::dom::js_error_message(&err)
                );
                self.submit();
            }
        }
    }

    /// Commit the visible text now, dropping any armed timer.
    pub fn submit(&self) {
        self.timer.borrow_mut().take();
        let committed = self.debouncer.borrow_mut().submit();
        if let Some(term) = committed {
            self.on_commit.emit(term);
        }
    }

    pub fn clear(&self) {
        self.debouncer.borrow_mut().reset_visible(String::new());
        self.visible.set(String::new());
        self.submit();
    }
}

/// Debounced search state for the calling component.
///
/// The pending commit is cancelled when the caller unmounts.
#[hook]
pub fn use_search_draft(
    committed: &str,
    quiet_period_ms: u32,
    on_commit: Callback<String>,
) -> SearchDraft {
    let debouncer = {
        let committed = committed.to_string();
        use_mut_ref(move || {
            Debouncer::with_value(Duration::from_millis(u64::from(quiet_period_ms)), committed)
        })
    };
    let timer: Rc<RefCell<Option<Timeout>>> = use_mut_ref(|| None);
    let visible = {
        let committed = committed.to_string();
        use_state(move || committed)
    };

    {
        let debouncer = debouncer.clone();
        let timer = timer.clone();
        use_effect_with((), move |()| {
            move || {
                timer.borrow_mut().take();
                debouncer.borrow_mut().teardown();
            }
        });
    }

    SearchDraft {
        debouncer,
        timer,
        visible,
        quiet_period_ms,
        on_commit,
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub draft: SearchDraft,
    pub sort: Option<SortOption>,
    pub on_sort_change: Callback<Option<SortOption>>,
}

/// Search box plus sort select.
///
/// Keystrokes update the box immediately; the term is committed after the
/// quiet period, on Enter, or on the search button.
#[function_component(ProductFilter)]
pub fn product_filter(props: &Props) -> Html {
    let on_input = {
        let draft = props.draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                draft.input(input.value());
            }
        })
    };

    let on_keydown = {
        let draft = props.draft.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                draft.submit();
            }
        })
    };

    let on_submit_click = {
        let draft = props.draft.clone();
        Callback::from(move |_: MouseEvent| draft.submit())
    };

    let on_clear = {
        let draft = props.draft.clone();
        Callback::from(move |_: MouseEvent| draft.clear())
    };

    let on_sort = {
        let cb = props.on_sort_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                cb.emit(SortOption::parse_optional(&select.value()));
            }
        })
    };

    let selected = props.sort.map_or("", SortOption::as_str);
    let visible = props.draft.value();

    html! {
        <div class="product-filter">
            <div class="product-filter__search" role="search">
                <input
                    type="search"
                    class="product-filter__input"
                    placeholder="Search products..."
                    aria-label="Search products"
                    value={visible.clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                />
                if !visible.is_empty() {
                    <button type="button" class="product-filter__clear" aria-label="Clear search" onclick={on_clear}>
                        {"×"}
                    </button>
                }
                <button type="button" class="product-filter__submit" onclick={on_submit_click}>
                    {"Search"}
                </button>
            </div>
            <select class="product-filter__sort" aria-label="Sort by" onchange={on_sort}>
                <option value="" selected={selected.is_empty()}>{"Sort by"}</option>
                { for SortOption::ALL.iter().map(|option| html! {
                    <option value={option.as_str()} selected={selected == option.as_str()}>
                        { option.label() }
                    </option>
                }) }
            </select>
        </div>
    }
}
