// src/app/bootstrap.rs
//
// Builds the application state from configuration.
//
// RULES:
// - One event bus shared by every service
// - No network traffic here; the first load happens in the console

use std::sync::Arc;

use log::info;

use crate::application::AppState;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::events::{register_activity_handlers, EventBus};
use crate::infrastructure::ExportWriter;
use crate::integrations::{HttpMovieClient, MovieClient};
use crate::services::{ExportService, MovieService};

/// Wire the HTTP client, services and activity log into an `AppState`.
pub fn init_app_state(config: &AppConfig) -> AppResult<AppState> {
    let client: Arc<dyn MovieClient> = Arc::new(HttpMovieClient::new(
        &config.api_base_url,
        config.request_timeout,
    )?);

    let state = build_state(client, config);
    info!(
        "Movie server: {} | page size {} | exports to {}",
        config.api_base_url,
        config.page_size,
        config.export_dir.display()
    );
    Ok(state)
}

pub(crate) fn build_state(client: Arc<dyn MovieClient>, config: &AppConfig) -> AppState {
    let event_bus = Arc::new(EventBus::new());
    register_activity_handlers(&event_bus);

    let movie_service = Arc::new(MovieService::new(
        client,
        config.page_size,
        event_bus.clone(),
    ));
    let export_service = Arc::new(ExportService::new(
        movie_service.clone(),
        ExportWriter::new(config.export_dir.clone()),
        event_bus.clone(),
    ));

    AppState {
        event_bus,
        movie_service,
        export_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, TransportError};
    use crate::events::MovieCreated;
    use std::path::PathBuf;
    use std::time::Duration;

    fn config(base_url: &str) -> AppConfig {
        AppConfig {
            api_base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            page_size: 3,
            export_dir: PathBuf::from("exports"),
        }
    }

    #[test]
    fn test_state_starts_empty_with_activity_log() {
        let state = init_app_state(&config("http://localhost:8585")).unwrap();

        assert_eq!(state.movie_service.current_page().page_count, 0);
        assert_eq!(state.event_bus.subscriber_count::<MovieCreated>(), 1);
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        match init_app_state(&config("not a url")) {
            Err(AppError::Transport(TransportError::InvalidBaseUrl(url))) => {
                assert_eq!(url, "not a url");
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("invalid base url was accepted"),
        }
    }
}
