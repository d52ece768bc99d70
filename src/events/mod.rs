// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod handlers;
pub mod types;

pub use types::DomainEvent;

pub use types::{CatalogExported, CatalogLoaded, MovieCreated, MovieDeleted, MovieUpdated};

pub use bus::{EventBus, EventLogEntry};

pub use handlers::register_activity_handlers;
