//! Pagination and search state for a list view
//!
//! A [`PageState`] does no fetching on its own: it turns "where the user is" (page,
//! page size, search term) into the query parameters a
//! [`TableSource`](crate::traits::TableSource) understands (an inclusive row range
//! and an optional [`SearchFilter`]).

use serde::{Deserialize, Serialize};

use crate::config;
use crate::traits::TableRecord;

/// A free-text term, matched case-insensitively against a record's searchable columns
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    /// Builds a filter from raw user input, or `None` when the input is empty
    pub fn new(term: &str) -> Option<Self> {
        if term.is_empty() {
            None
        } else {
            Some(Self { term: term.to_string() })
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Tells whether at least one searchable column of `record` contains the term
    pub fn matches<R: TableRecord>(&self, record: &R) -> bool {
        let needle = self.term.to_lowercase();
        record
            .search_values()
            .iter()
            .any(|value| value.to_lowercase().contains(&needle))
    }
}

/// Where a paginated view currently is: page, page size, last known total row count,
/// and the active search term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    page_size: usize,
    total: usize,
    search: String,
}

impl PageState {
    /// Starts on page 1 with the configured default page size
    pub fn new() -> Self {
        let page_size = *config::DEFAULT_PAGE_SIZE.lock().unwrap();
        Self::with_page_size(page_size)
    }

    /// Starts on page 1 with an explicit page size (clamped to at least 1)
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total: 0,
            search: String::new(),
        }
    }

    pub fn page(&self) -> usize { self.page }
    pub fn page_size(&self) -> usize { self.page_size }
    pub fn total(&self) -> usize { self.total }
    pub fn search(&self) -> &str { &self.search }

    /// The inclusive row range the current page covers: `((page-1)*size, page*size-1)`
    pub fn range(&self) -> (usize, usize) {
        let start = (self.page - 1) * self.page_size;
        let end = self.page * self.page_size - 1;
        (start, end)
    }

    /// The filter matching the current search term, or `None` when the term is empty
    pub fn filter(&self) -> Option<SearchFilter> {
        SearchFilter::new(&self.search)
    }

    /// Stores a new search term and resets the view to page 1
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.page = 1;
    }

    /// Moves to `page` (clamped to at least 1)
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Changes the page size (clamped to at least 1). The current page is kept: an
    /// out-of-range page simply reads back empty.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Adopts the authoritative row count the store reported
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Accounts for one newly inserted row
    pub fn increment_total(&mut self) {
        self.total += 1;
    }

    /// Moves one page back, unless already on page 1
    pub fn step_back(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// How many pages the last known total spans
    pub fn page_count(&self) -> usize {
        (self.total + self.page_size - 1) / self.page_size
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}
