// src/services/catalog.rs
//
// Catalog state: the loaded movie list plus the search term and page the
// table is showing.
//
// RULES:
// - Searching never drops rows from the loaded list
// - Pages are 1-based and always clamped to the filtered list
// - The list is only ever replaced wholesale (initial load, refresh after write)

use crate::domain::{MovieId, MovieRecord};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of the filtered list, as the table renders it
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub movies: Vec<MovieRecord>,
    pub page: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub search_term: String,
}

#[derive(Debug, Clone)]
pub struct CatalogState {
    movies: Vec<MovieRecord>,
    search_term: String,
    page: usize,
    page_size: usize,
}

impl CatalogState {
    /// A page size of 0 is treated as 1
    pub fn new(page_size: usize) -> Self {
        Self {
            movies: Vec::new(),
            search_term: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Swap in a freshly fetched list, keeping the search term
    pub fn replace(&mut self, movies: Vec<MovieRecord>) {
        self.movies = movies;
        self.page = self.clamp_page(self.page);
    }

    /// Change the search term and go back to the first page
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Rows whose name contains the search term, ignoring case
    pub fn filtered(&self) -> Vec<&MovieRecord> {
        let needle = self.search_term.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| needle.is_empty() || movie.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// Move to `page`, clamped to the available pages; returns the page shown
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = self.clamp_page(page);
        self.page
    }

    pub fn current_page(&self) -> Vec<&MovieRecord> {
        let start = (self.page - 1) * self.page_size;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    pub fn find(&self, id: &MovieId) -> Option<&MovieRecord> {
        self.movies.iter().find(|movie| movie.id.as_ref() == Some(id))
    }

    pub fn view(&self) -> CatalogPage {
        CatalogPage {
            movies: self.current_page().into_iter().cloned().collect(),
            page: self.page,
            page_count: self.page_count(),
            filtered_count: self.filtered().len(),
            total_count: self.movies.len(),
            search_term: self.search_term.clone(),
        }
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.page_count().max(1))
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
