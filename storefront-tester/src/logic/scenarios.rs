//! Logic scenarios run against the engine for every seed and iteration.
use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, ensure};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use storefront_core::pipeline::compare_names;
use storefront_core::{
    Action, Debouncer, FetchStatus, HEADER_ROW, Price, Product, ProductId, QueryState,
    RowDescriptor, SortOption, StorefrontConfig, Store, Viewport, derive_view, filter_products,
    paginate, recommendations, shuffled_indices, sort_products, total_pages,
};

/// Everything a scenario check may look at for one iteration.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioInput<'a> {
    pub products: &'a [Product],
    pub config: &'a StorefrontConfig,
    pub seed: u64,
}

impl ScenarioInput<'_> {
    fn rng(&self) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(self.seed)
    }
}

type Check = fn(&ScenarioInput<'_>) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    check: Check,
}

impl TestScenario {
    /// Run the check once.
    ///
    /// # Errors
    ///
    /// Returns the first violated expectation.
    pub fn run(&self, input: &ScenarioInput<'_>) -> Result<()> {
        (self.check)(input)
    }
}

const SCENARIOS: &[TestScenario] = &[
    TestScenario {
        key: "smoke",
        name: "Smoke Test",
        check: smoke,
    },
    TestScenario {
        key: "filter-subset",
        name: "Search Filter Subset",
        check: filter_subset,
    },
    TestScenario {
        key: "sort-reversal",
        name: "Sort Ordering and Stability",
        check: sort_ordering,
    },
    TestScenario {
        key: "pagination-bounds",
        name: "Pagination Bounds",
        check: pagination_bounds,
    },
    TestScenario {
        key: "query-resets",
        name: "Query Page Resets",
        check: query_resets,
    },
    TestScenario {
        key: "recommendation-determinism",
        name: "Recommendation Determinism",
        check: recommendation_determinism,
    },
    TestScenario {
        key: "debounce-burst",
        name: "Debounced Search Burst",
        check: debounce_burst,
    },
    TestScenario {
        key: "viewport-reshape",
        name: "Virtual Grid Reshape",
        check: viewport_reshape,
    },
    TestScenario {
        key: "price-desc-example",
        name: "Price Descending Ladder",
        check: price_desc_example,
    },
];

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let key = match name.to_lowercase().as_str() {
        "filter" | "search" => "filter-subset".to_string(),
        "sort" => "sort-reversal".to_string(),
        "pagination" | "pages" => "pagination-bounds".to_string(),
        "recommendations" => "recommendation-determinism".to_string(),
        "debounce" => "debounce-burst".to_string(),
        "viewport" | "grid" => "viewport-reshape".to_string(),
        other => other.to_string(),
    };
    SCENARIOS.iter().find(|scenario| scenario.key == key).copied()
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|scenario| (scenario.key, scenario.name))
        .collect()
}

pub fn scenario_keys() -> impl Iterator<Item = &'static str> {
    SCENARIOS.iter().map(|scenario| scenario.key)
}

fn ids<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<ProductId> {
    products.into_iter().map(|product| product.id).collect()
}

fn catalog_positions(products: &[Product]) -> HashMap<ProductId, usize> {
    products
        .iter()
        .enumerate()
        .map(|(position, product)| (product.id, position))
        .collect()
}

fn smoke(input: &ScenarioInput<'_>) -> Result<()> {
    let store = Store::with_config(input.config.clone());
    store.dispatch(Action::FetchStarted);
    store.dispatch(Action::FetchSucceeded(input.products.to_vec()));

    let state = store.state();
    ensure!(
        state.catalog.status() == FetchStatus::Ready,
        "catalog should be ready, got {:?}",
        state.catalog.status()
    );
    let view = store.view();
    let expected = input.products.len().min(state.query.page_size);
    ensure!(
        view.items.len() == expected,
        "first page should hold {expected} products, got {}",
        view.items.len()
    );
    ensure!(
        view.matched == input.products.len(),
        "empty search should match every product"
    );
    let picks = store.recommendations();
    let expected = input.products.len().min(input.config.recommendation_count);
    ensure!(
        picks.len() == expected,
        "expected {expected} recommendations, got {}",
        picks.len()
    );
    Ok(())
}

/// A random fragment of a random product name, case scrambled.
fn pick_needle(products: &[Product], rng: &mut ChaCha20Rng) -> Option<(ProductId, String)> {
    let product = products.choose(rng)?;
    let chars: Vec<char> = product.name.chars().collect();
    if chars.is_empty() {
        return None;
    }
    let start = rng.gen_range(0..chars.len());
    let len = rng.gen_range(1..=(chars.len() - start).min(4));
    let needle = chars[start..start + len]
        .iter()
        .map(|c| {
            if rng.gen_bool(0.5) {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();
    Some((product.id, needle))
}

fn filter_subset(input: &ScenarioInput<'_>) -> Result<()> {
    let all = filter_products(input.products, "");
    ensure!(
        all.len() == input.products.len(),
        "empty search must keep every product"
    );

    let mut rng = input.rng();
    let Some((source, needle)) = pick_needle(input.products, &mut rng) else {
        return Ok(());
    };
    let matched = filter_products(input.products, &needle);
    ensure!(
        matched.iter().any(|product| product.id == source),
        "product {source} should match its own name fragment '{needle}'"
    );

    let lowered = needle.to_lowercase();
    let positions = catalog_positions(input.products);
    let mut previous = None;
    for product in &matched {
        ensure!(
            product.matches_lowered(&lowered),
            "product {} does not contain '{needle}'",
            product.id
        );
        let position = positions.get(&product.id).copied();
        ensure!(
            position > previous,
            "filter reordered product {}",
            product.id
        );
        previous = position;
    }
    Ok(())
}

fn sort_ordering(input: &ScenarioInput<'_>) -> Result<()> {
    let positions = catalog_positions(input.products);
    let mut expected_ids = ids(input.products);
    expected_ids.sort_unstable();

    for sort in SortOption::ALL {
        let mut sorted: Vec<&Product> = input.products.iter().collect();
        sort_products(&mut sorted, Some(sort));

        let mut sorted_ids = ids(sorted.iter().copied());
        sorted_ids.sort_unstable();
        ensure!(sorted_ids == expected_ids, "{sort} dropped or duplicated products");

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let ordering = match sort {
                SortOption::PriceAsc => a.price.cmp(&b.price),
                SortOption::PriceDesc => b.price.cmp(&a.price),
                SortOption::NameAsc => compare_names(&a.name, &b.name),
                SortOption::NameDesc => compare_names(&b.name, &a.name),
            };
            ensure!(
                ordering.is_le(),
                "{sort} placed {} before {}",
                a.id,
                b.id
            );
            if ordering.is_eq() {
                ensure!(
                    positions.get(&a.id) < positions.get(&b.id),
                    "{sort} is not stable for tied products {} and {}",
                    a.id,
                    b.id
                );
            }
        }
    }

    let mut prices: Vec<Price> = input.products.iter().map(|product| product.price).collect();
    prices.sort_unstable();
    prices.dedup();
    if prices.len() == input.products.len() {
        let mut ascending: Vec<&Product> = input.products.iter().collect();
        let mut descending = ascending.clone();
        sort_products(&mut ascending, Some(SortOption::PriceAsc));
        sort_products(&mut descending, Some(SortOption::PriceDesc));
        ascending.reverse();
        ensure!(
            ids(ascending) == ids(descending),
            "price_desc should reverse price_asc when prices are distinct"
        );
    }

    let mut unsorted: Vec<&Product> = input.products.iter().collect();
    sort_products(&mut unsorted, None);
    ensure!(
        ids(unsorted) == ids(input.products),
        "no sort must keep catalog order"
    );
    Ok(())
}

fn pagination_bounds(input: &ScenarioInput<'_>) -> Result<()> {
    let mut rng = input.rng();
    let page_size = input
        .config
        .page_size_options
        .choose(&mut rng)
        .copied()
        .unwrap_or(input.config.default_page_size);
    let sort = SortOption::ALL.choose(&mut rng).copied();

    let mut query = QueryState::with_page_size(page_size);
    query.set_sort_option(sort);
    let mut ordered: Vec<&Product> = input.products.iter().collect();
    sort_products(&mut ordered, sort);

    let pages = total_pages(ordered.len(), page_size);
    let mut stitched = Vec::with_capacity(ordered.len());
    for page in 1..=pages {
        query.set_current_page(page);
        let view = derive_view(input.products, &query);
        ensure!(view.total_pages == pages, "page count drifted on page {page}");
        ensure!(
            view.items.len() <= page_size,
            "page {page} holds {} items for size {page_size}",
            view.items.len()
        );
        if page < pages {
            ensure!(
                view.items.len() == page_size,
                "non-final page {page} is short"
            );
        }
        ensure!(
            ids(&view.items) == ids(paginate(&ordered, page, page_size).iter().copied()),
            "derived page {page} disagrees with direct pagination"
        );
        stitched.extend(view.items);
    }
    ensure!(
        ids(&stitched) == ids(ordered.iter().copied()),
        "pages do not stitch back into the sorted catalog"
    );

    query.set_current_page(pages + 1);
    ensure!(
        derive_view(input.products, &query).is_empty(),
        "page past the end must be empty"
    );
    Ok(())
}

fn query_resets(input: &ScenarioInput<'_>) -> Result<()> {
    let store = Store::with_config(input.config.clone());
    store.dispatch(Action::FetchStarted);
    store.dispatch(Action::FetchSucceeded(input.products.to_vec()));

    let resets = [
        Action::SetSearchTerm("a".to_string()),
        Action::SetSortOption(Some(SortOption::NameAsc)),
        Action::SetPageSize(input.config.page_size_options.first().copied().unwrap_or(10)),
    ];
    for action in resets {
        store.dispatch(Action::SetCurrentPage(3));
        let generation = store.state().view_generation;
        store.dispatch(action);
        let state = store.state();
        ensure!(
            state.query.current_page == 1,
            "query change left page at {}",
            state.query.current_page
        );
        ensure!(
            state.view_generation > generation,
            "query change did not start a new view"
        );
    }

    let before = store.state().query.clone();
    store.dispatch(Action::SetCurrentPage(2));
    let after = store.state().query.clone();
    ensure!(after.current_page == 2, "page change was not applied");
    ensure!(
        after.search_term == before.search_term
            && after.sort == before.sort
            && after.page_size == before.page_size,
        "page change touched other query fields"
    );

    let generation = store.state().view_generation;
    store.dispatch(Action::RefreshRecommendations);
    ensure!(
        store.state().view_generation == generation,
        "refreshing recommendations must not reset the view"
    );

    store.dispatch(Action::ChangePage {
        page: usize::MAX,
        page_size: usize::MAX,
    });
    let state = store.state();
    ensure!(
        state.query.page_size <= input.config.max_page_size,
        "page size {} exceeds the maximum",
        state.query.page_size
    );
    let last = total_pages(state.matched_count(), state.query.page_size);
    ensure!(
        state.query.current_page == last,
        "pager jump should clamp to page {last}, got {}",
        state.query.current_page
    );
    Ok(())
}

fn recommendation_determinism(input: &ScenarioInput<'_>) -> Result<()> {
    let count = input.config.recommendation_count;
    let first = recommendations(input.products, input.seed, count);
    let second = recommendations(input.products, input.seed, count);
    ensure!(first == second, "same seed produced different picks");
    ensure!(
        first.len() == input.products.len().min(count),
        "expected {} picks, got {}",
        input.products.len().min(count),
        first.len()
    );

    let mut pick_ids = ids(&first);
    pick_ids.sort_unstable();
    pick_ids.dedup();
    ensure!(pick_ids.len() == first.len(), "picks repeat a product");
    let positions = catalog_positions(input.products);
    ensure!(
        pick_ids.iter().all(|id| positions.contains_key(id)),
        "picks include a product outside the catalog"
    );

    let mut permutation = shuffled_indices(input.products.len(), input.seed);
    permutation.sort_unstable();
    ensure!(
        permutation == (0..input.products.len()).collect::<Vec<_>>(),
        "shuffle is not a permutation"
    );

    let store = Store::with_config(input.config.clone());
    store.dispatch(Action::FetchStarted);
    store.dispatch(Action::FetchSucceeded(input.products.to_vec()));
    store.dispatch(Action::RefreshRecommendations);
    let refreshed = store.recommendations();
    ensure!(
        *refreshed == *recommendations(input.products, 1, count),
        "refresh should move to the next seed"
    );
    Ok(())
}

fn debounce_burst(input: &ScenarioInput<'_>) -> Result<()> {
    let mut rng = input.rng();
    let quiet = Duration::from_millis(u64::from(input.config.search_debounce_ms));
    let mut debouncer = Debouncer::new(quiet);

    let burst = rng.gen_range(2..=12);
    let mut tickets = Vec::with_capacity(burst);
    let mut typed = String::new();
    for _ in 0..burst {
        typed.push(char::from(rng.gen_range(b'a'..=b'z')));
        if let Some(ticket) = debouncer.input(typed.clone()) {
            tickets.push(ticket);
        }
    }
    ensure!(tickets.len() == burst, "live debouncer refused input");
    ensure!(debouncer.visible() == typed, "visible value lags the input");

    let newest = tickets.last().copied();
    tickets.shuffle(&mut rng);
    let mut commits = Vec::new();
    for ticket in &tickets {
        if let Some(value) = debouncer.fire(*ticket) {
            ensure!(Some(*ticket) == newest, "stale ticket committed '{value}'");
            commits.push(value);
        }
    }
    ensure!(
        commits == vec![typed.clone()],
        "burst should commit once with the last value, got {commits:?}"
    );
    ensure!(!debouncer.is_pending(), "commit left a pending timer");

    let late = debouncer.input(format!("{typed}!"));
    debouncer.teardown();
    if let Some(ticket) = late {
        ensure!(
            debouncer.fire(ticket).is_none(),
            "timer fired after teardown"
        );
    }
    ensure!(debouncer.submit().is_none(), "submit after teardown committed");
    Ok(())
}

fn viewport_reshape(input: &ScenarioInput<'_>) -> Result<()> {
    let mut rng = input.rng();
    let item_count = input.products.len().min(input.config.default_page_size);
    let mut viewport = Viewport::new(input.config.layout.clone());
    viewport.set_content(item_count, true, 1);

    for step in 0..8 {
        let width = rng.gen_range(320..=1600);
        let height = rng.gen_range(300..=1200);
        let total = viewport.window().total_height;
        viewport.scroll_to(rng.gen_range(0..=total));

        let before = viewport.layout();
        let top_row = before.row_at_offset(viewport.scroll_top());
        let anchor =
            (top_row != HEADER_ROW && item_count > 0).then(|| (top_row - 1) * before.columns());

        viewport.resize(width, height);
        let layout = viewport.layout();
        let window = viewport.window();

        let mut covered = Vec::with_capacity(item_count);
        for index in 1..layout.row_count() {
            match layout.row(index) {
                Some(RowDescriptor::Products(range)) => covered.extend(range),
                other => anyhow::bail!("row {index} should hold products, got {other:?}"),
            }
        }
        ensure!(
            covered == (0..item_count).collect::<Vec<_>>(),
            "step {step}: rows do not cover each item exactly once"
        );
        ensure!(
            viewport.scroll_top() <= layout.max_scroll(viewport.height()),
            "step {step}: scroll {} past the end",
            viewport.scroll_top()
        );
        if let Some(item) = anchor {
            let row = layout.row_of_item(item);
            ensure!(
                window.rows.contains(&row),
                "step {step}: anchor item {item} (row {row}) left the window {:?}",
                window.rows
            );
        }
    }

    viewport.scroll_to(u32::MAX);
    viewport.set_content(item_count, true, 2);
    ensure!(
        viewport.scroll_top() == 0,
        "new view should scroll back to the top"
    );
    Ok(())
}

fn price_desc_example(_input: &ScenarioInput<'_>) -> Result<()> {
    let ladder: Vec<Product> = (1..=10)
        .map(|i| Product {
            id: i,
            name: format!("P{i}"),
            price: Price::from_cents(i64::from(i) * 1_000),
            description: String::new(),
            image: String::new(),
        })
        .collect();
    let mut query = QueryState::with_page_size(4);
    query.set_sort_option(Some(SortOption::PriceDesc));

    let first = derive_view(&ladder, &query);
    ensure!(
        ids(&first.items) == vec![10, 9, 8, 7],
        "page 1 should be P10..P7, got {:?}",
        ids(&first.items)
    );
    query.set_current_page(3);
    let third = derive_view(&ladder, &query);
    ensure!(
        ids(&third.items) == vec![2, 1],
        "page 3 should be P2, P1, got {:?}",
        ids(&third.items)
    );
    ensure!(third.total_pages == 3, "ten items at four per page is three pages");
    Ok(())
}
