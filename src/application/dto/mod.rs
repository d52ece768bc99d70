// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// - DTOs are UI-friendly representations
// - Form DTOs carry raw text exactly as typed
// - Conversion to domain drafts happens here, validation does not

use serde::{Deserialize, Serialize};

use crate::domain::{MovieDraft, MovieId, MovieRecord};
use crate::services::{CatalogPage, ExportOutcome};

// ============================================================================
// MOVIE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: Option<String>,
    pub name: String,
    pub duration: String,
    pub rating: f64,
}

impl From<MovieRecord> for MovieDto {
    fn from(record: MovieRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_string()),
            name: record.name,
            duration: record.duration,
            rating: record.rating,
        }
    }
}

/// The add/edit dialog fields, as text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieFormDto {
    pub name: String,
    pub duration: String,
    pub rating: String,
}

impl MovieFormDto {
    /// An empty or non-numeric rating becomes `None` so validation reports it.
    /// Infinities pass through and fail the range check.
    pub fn into_draft(self, id: Option<MovieId>) -> MovieDraft {
        let rating = self
            .rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| !value.is_nan());

        MovieDraft {
            id,
            name: self.name,
            duration: self.duration,
            rating,
        }
    }
}

impl From<&MovieRecord> for MovieFormDto {
    fn from(record: &MovieRecord) -> Self {
        Self {
            name: record.name.clone(),
            duration: record.duration.clone(),
            rating: record.rating.to_string(),
        }
    }
}

// ============================================================================
// CATALOG DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPageDto {
    pub movies: Vec<MovieDto>,
    pub page: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub search_term: String,
}

impl From<CatalogPage> for CatalogPageDto {
    fn from(view: CatalogPage) -> Self {
        Self {
            movies: view.movies.into_iter().map(MovieDto::from).collect(),
            page: view.page,
            page_count: view.page_count,
            filtered_count: view.filtered_count,
            total_count: view.total_count,
            search_term: view.search_term,
        }
    }
}

// ============================================================================
// EXPORT DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResultDto {
    pub format: String,
    pub path: String,
    pub movie_count: usize,
}

impl From<ExportOutcome> for ExportResultDto {
    fn from(outcome: ExportOutcome) -> Self {
        Self {
            format: outcome.format.to_string(),
            path: outcome.path.display().to_string(),
            movie_count: outcome.movie_count,
        }
    }
}
