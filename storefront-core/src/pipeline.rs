//! Derivation pipeline: filter, then sort, then paginate.
//!
//! Every stage is a pure function of the catalog and query, so the view can be
//! recomputed synchronously whenever either input changes.
use crate::product::Product;
use crate::query::{QueryState, SortOption, total_pages};
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Products matching `search_term`, in catalog order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], search_term: &str) -> Vec<&'a Product> {
    let needle = search_term.to_lowercase();
    products
        .iter()
        .filter(|product| product.matches_lowered(&needle))
        .collect()
}

/// Stable sort; ties keep their filter-stage order. `None` leaves the order untouched.
pub fn sort_products(products: &mut [&Product], sort: Option<SortOption>) {
    let Some(sort) = sort else {
        return;
    };
    match sort {
        SortOption::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::NameAsc => products.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOption::NameDesc => products.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }
}

/// Slice `[(page-1)*size, (page-1)*size + size)`; pages past the end yield an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Collation for product names.
///
/// Names compare on their case-folded base letters first, so "Éclair" sits
/// with the E's. Ties go to the accented form last, then to the lower-case
/// form first. Shorter prefixes sort first.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .map(|(x, y)| case_rank(x).cmp(&case_rank(y)))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfkd().flat_map(char::to_lowercase)
}

fn case_rank(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

/// One page of the filtered, sorted catalog plus the counts the pager needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    pub items: Vec<Product>,
    /// Number of products that passed the filter stage.
    pub matched: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl CatalogView {
    /// True when the current page has nothing to show (no matches, or a page past the end).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Run all three stages for `query` over `products`.
#[must_use]
pub fn derive_view(products: &[Product], query: &QueryState) -> CatalogView {
    let mut matched = filter_products(products, &query.search_term);
    sort_products(&mut matched, query.sort);
    let items = paginate(&matched, query.current_page, query.page_size)
        .iter()
        .map(|product| (*product).clone())
        .collect();
    CatalogView {
        items,
        matched: matched.len(),
        page: query.current_page,
        page_size: query.page_size,
        total_pages: total_pages(matched.len(), query.page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;

    fn product(id: u32, name: &str, cents: i64, description: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: Price::from_cents(cents),
            description: description.to_string(),
            image: String::new(),
        }
    }

    fn ids(products: &[&Product]) -> Vec<u32> {
        products.iter().map(|p| p.id).collect()
    }

    fn ladder() -> Vec<Product> {
        (1..=10)
            .map(|i| product(i, &format!("P{i}"), i64::from(i) * 1_000, "item"))
            .collect()
    }

    #[test]
    fn filter_matches_name_or_description_case_insensitively() {
        let catalog = vec![
            product(1, "Smartphone 15 Pro", 99_900, "Titanium"),
            product(2, "Wireless Headphones", 29_999, "Over-ear"),
            product(3, "Tablet", 109_900, "Best PHONE companion"),
        ];
        assert_eq!(ids(&filter_products(&catalog, "PHONE ")), vec![1, 3]);
        assert_eq!(ids(&filter_products(&catalog, "Phone")), vec![1, 2, 3]);
        assert_eq!(ids(&filter_products(&catalog, "smart")), vec![1]);
        assert_eq!(ids(&filter_products(&catalog, "")), vec![1, 2, 3]);
    }

    #[test]
    fn phone_search_is_a_plain_substring_match() {
        let catalog = vec![
            product(1, "Smartphone 15 Pro", 99_900, "A17 chip"),
            product(2, "Wireless Headphones", 29_999, "Noise cancelling"),
            product(3, "Portable SSD", 8_999, "USB-C"),
        ];
        assert_eq!(ids(&filter_products(&catalog, "phone")), vec![1, 2]);
        assert_eq!(ids(&filter_products(&catalog, "smartphone")), vec![1]);
    }

    #[test]
    fn price_sorts_are_stable_on_ties() {
        let catalog = vec![
            product(1, "A", 500, ""),
            product(2, "B", 100, ""),
            product(3, "C", 500, ""),
            product(4, "D", 300, ""),
        ];
        let mut asc = filter_products(&catalog, "");
        sort_products(&mut asc, Some(SortOption::PriceAsc));
        assert_eq!(ids(&asc), vec![2, 4, 1, 3]);

        let mut desc = filter_products(&catalog, "");
        sort_products(&mut desc, Some(SortOption::PriceDesc));
        assert_eq!(ids(&desc), vec![1, 3, 4, 2]);
    }

    #[test]
    fn name_sort_folds_case() {
        let catalog = vec![
            product(1, "banana", 1, ""),
            product(2, "Apple", 1, ""),
            product(3, "cherry", 1, ""),
            product(4, "apple", 1, ""),
        ];
        let mut asc = filter_products(&catalog, "");
        sort_products(&mut asc, Some(SortOption::NameAsc));
        assert_eq!(ids(&asc), vec![4, 2, 1, 3]);

        let mut desc = filter_products(&catalog, "");
        sort_products(&mut desc, Some(SortOption::NameDesc));
        assert_eq!(ids(&desc), vec![3, 1, 2, 4]);
    }

    #[test]
    fn name_sort_places_accented_letters_with_their_base() {
        let catalog = vec![
            product(1, "Zebra Lamp", 1, ""),
            product(2, "Éclair Mug", 1, ""),
            product(3, "Eclair Mug", 1, ""),
            product(4, "apple", 1, ""),
        ];
        let mut asc = filter_products(&catalog, "");
        sort_products(&mut asc, Some(SortOption::NameAsc));
        assert_eq!(ids(&asc), vec![4, 3, 2, 1]);
        assert_eq!(compare_names("Éclair", "Zebra"), Ordering::Less);
        assert_eq!(compare_names("ﬁg", "fig"), Ordering::Equal);
    }

    #[test]
    fn no_sort_keeps_catalog_order() {
        let catalog = ladder();
        let mut view = filter_products(&catalog, "");
        view.reverse();
        sort_products(&mut view, None);
        assert_eq!(ids(&view), (1..=10).rev().collect::<Vec<_>>());
    }

    #[test]
    fn paginate_handles_short_and_out_of_range_pages() {
        let items: Vec<u32> = (1..=10).collect();
        assert_eq!(paginate(&items, 1, 4), &[1, 2, 3, 4]);
        assert_eq!(paginate(&items, 3, 4), &[9, 10]);
        assert!(paginate(&items, 4, 4).is_empty());
        assert!(paginate(&items, usize::MAX, 4).is_empty());
    }

    #[test]
    fn price_desc_ladder_pages() {
        let catalog = ladder();
        let mut query = QueryState::with_page_size(4);
        query.set_sort_option(Some(SortOption::PriceDesc));

        let first = derive_view(&catalog, &query);
        let names: Vec<&str> = first.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["P10", "P9", "P8", "P7"]);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.matched, 10);

        query.set_current_page(3);
        let third = derive_view(&catalog, &query);
        let names: Vec<&str> = third.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["P2", "P1"]);
    }

    #[test]
    fn page_beyond_data_is_empty_not_clamped() {
        let catalog = ladder();
        let mut query = QueryState::with_page_size(4);
        query.set_current_page(9);
        let view = derive_view(&catalog, &query);
        assert!(view.is_empty());
        assert_eq!(view.page, 9);
    }
}
