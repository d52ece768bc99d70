// events/types.rs
//
// Catalog events. Each one is a fact that has already happened on the
// server or in the catalog state.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::domain::MovieId;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ident) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($event)
            }
        }
    };
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted after the movie list has been (re)fetched from the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_count: usize,
}

impl CatalogLoaded {
    pub fn new(movie_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_count,
        }
    }
}

impl_domain_event!(CatalogLoaded);

/// Emitted when the current filtered list was written to a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogExported {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub format: String, // "text", "csv"
    pub path: PathBuf,
    pub movie_count: usize,
}

impl CatalogExported {
    pub fn new(format: String, path: PathBuf, movie_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            format,
            path,
            movie_count,
        }
    }
}

impl_domain_event!(CatalogExported);

// ============================================================================
// MOVIE EVENTS
// ============================================================================

/// Emitted when the server accepted a new movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Absent when the server did not echo the stored record
    pub movie_id: Option<MovieId>,
    pub name: String,
}

impl MovieCreated {
    pub fn new(movie_id: Option<MovieId>, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            name,
        }
    }
}

impl_domain_event!(MovieCreated);

/// Emitted when the server accepted an edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub name: String,
}

impl MovieUpdated {
    pub fn new(movie_id: MovieId, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            name,
        }
    }
}

impl_domain_event!(MovieUpdated);

/// Emitted when the server deleted a movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
}

impl MovieDeleted {
    pub fn new(movie_id: MovieId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
        }
    }
}

impl_domain_event!(MovieDeleted);
