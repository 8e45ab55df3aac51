//! Query state: search term, sort option, and pagination.
//!
//! Every mutator except [`QueryState::set_current_page`] returns the view to
//! the first page, since the size or order of the result set changes.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const FIRST_PAGE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortOption {
    pub const ALL: [Self; 4] = [Self::PriceAsc, Self::PriceDesc, Self::NameAsc, Self::NameDesc];

    /// Wire identifier used by the filter select.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
        }
    }

    /// Parse a select value; an empty string means "no sort".
    #[must_use]
    pub fn parse_optional(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort option '{0}'")]
pub struct UnknownSortOption(pub String);

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| UnknownSortOption(s.to_string()))
    }
}

/// User-controlled parameters deciding which slice of the catalog is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_term: String,
    pub sort: Option<SortOption>,
    /// 1-based
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::with_page_size(50)
    }
}

impl QueryState {
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            current_page: FIRST_PAGE,
            page_size: page_size.max(1),
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = FIRST_PAGE;
    }

    pub fn set_sort_option(&mut self, sort: Option<SortOption>) {
        self.sort = sort;
        self.current_page = FIRST_PAGE;
    }

    /// Zero is not a page size; it is raised to one.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = FIRST_PAGE;
    }

    /// Pages are 1-based; zero is raised to the first page. Pages beyond the
    /// data are kept as-is and derive an empty slice.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page.max(FIRST_PAGE);
    }

    /// Apply a pager event carrying both page and page size.
    ///
    /// The page size is applied first, then the requested page is validated
    /// against the page count that size produces for `matched` results.
    pub fn change_page(&mut self, page: usize, page_size: usize, matched: usize) {
        self.page_size = page_size.max(1);
        let last = total_pages(matched, self.page_size);
        self.current_page = page.clamp(FIRST_PAGE, last);
    }

    /// Lower-cased search needle used by the filter stage.
    #[must_use]
    pub fn needle(&self) -> String {
        self.search_term.to_lowercase()
    }

    /// Offset of the first item on the current page.
    #[must_use]
    pub fn page_start(&self) -> usize {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }
}

/// Number of pages needed for `matched` items; never less than one.
#[must_use]
pub fn total_pages(matched: usize, page_size: usize) -> usize {
    matched.div_ceil(page_size.max(1)).max(1)
}
