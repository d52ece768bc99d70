// src/application/state.rs

use std::sync::Arc;

use crate::events::EventBus;
use crate::services::{ExportService, MovieService};

/// Application state shared by every command.
/// Services are wired in app::bootstrap and passed here.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub movie_service: Arc<MovieService>,
    pub export_service: Arc<ExportService>,
}
