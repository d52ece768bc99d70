// src/lib.rs
// MovieHub - Client for a remote movie list
//
// Architecture:
// - Domain-centric: Validation rules live in the domain
// - Event-driven: Services announce catalog changes on the bus
// - Explicit: The server is the source of truth; the list is always refetched
// - Application Layer: UI boundary (commands, DTOs, error responses)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod integrations;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    parse_duration_token, validate_duration, validate_movie, validate_name, validate_rating,
    DurationUnit, MovieDraft, MovieField, MovieId, MovieRecord, ValidationError,
    ValidationErrors, ValidationRule,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, TransportError};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    register_activity_handlers, CatalogExported, CatalogLoaded, DomainEvent,
    EventBus, EventLogEntry, MovieCreated, MovieDeleted, MovieUpdated,
};

// ============================================================================
// PUBLIC API - Infrastructure & Integrations
// ============================================================================

pub use infrastructure::ExportWriter;
pub use integrations::{HttpMovieClient, MovieClient};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CatalogPage, CatalogState, ExportFormat, ExportOutcome, ExportService, MovieService,
};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::AppConfig;
