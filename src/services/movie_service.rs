// src/services/movie_service.rs
use log::{info, warn};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{MovieDraft, MovieId, MovieRecord};
use crate::error::{AppError, AppResult};
use crate::events::{CatalogLoaded, EventBus, MovieCreated, MovieDeleted, MovieUpdated};
use crate::integrations::MovieClient;
use crate::services::catalog::{CatalogPage, CatalogState};

/// Owns the catalog state and runs every write through validation, the
/// movie client and a refresh of the list.
pub struct MovieService {
    client: Arc<dyn MovieClient>,
    catalog: RwLock<CatalogState>,
    event_bus: Arc<EventBus>,
}

impl MovieService {
    pub fn new(client: Arc<dyn MovieClient>, page_size: usize, event_bus: Arc<EventBus>) -> Self {
        Self {
            client,
            catalog: RwLock::new(CatalogState::new(page_size)),
            event_bus,
        }
    }

    /// Fetch the full list from the server and replace the catalog with it
    pub async fn load(&self) -> AppResult<CatalogPage> {
        let movies = self.client.list_movies().await.map_err(|e| {
            warn!("Failed to load movies: {}", e);
            AppError::Transport(e)
        })?;

        let movie_count = movies.len();
        let view = {
            let mut catalog = self.write_catalog();
            catalog.replace(movies);
            catalog.view()
        };

        info!("Loaded {} movies", movie_count);
        self.event_bus.emit(CatalogLoaded::new(movie_count));
        Ok(view)
    }

    pub async fn create(&self, draft: MovieDraft) -> AppResult<MovieRecord> {
        let record = draft.into_record()?;

        let saved = self.client.create_movie(&record).await.map_err(|e| {
            warn!("Failed to create movie {:?}: {}", record.name, e);
            AppError::Transport(e)
        })?;

        info!("Created movie {:?}", saved.name);
        self.event_bus
            .emit(MovieCreated::new(saved.id.clone(), saved.name.clone()));

        self.load().await?;
        Ok(saved)
    }

    /// Same rules as `create`; the draft must carry the id of the row being edited
    pub async fn update(&self, draft: MovieDraft) -> AppResult<MovieRecord> {
        let record = draft.into_record()?;
        let id = record.id.clone().ok_or(AppError::MissingId)?;

        let saved = self.client.update_movie(&id, &record).await.map_err(|e| {
            warn!("Failed to update movie {}: {}", id, e);
            AppError::Transport(e)
        })?;

        info!("Updated movie {}", id);
        self.event_bus
            .emit(MovieUpdated::new(id, saved.name.clone()));

        self.load().await?;
        Ok(saved)
    }

    /// Deletion needs nothing but the id; no validation runs
    pub async fn delete(&self, id: &MovieId) -> AppResult<()> {
        self.client.delete_movie(id).await.map_err(|e| {
            warn!("Failed to delete movie {}: {}", id, e);
            AppError::Transport(e)
        })?;

        info!("Deleted movie {}", id);
        self.event_bus.emit(MovieDeleted::new(id.clone()));

        self.load().await?;
        Ok(())
    }

    pub fn search(&self, term: &str) -> CatalogPage {
        let mut catalog = self.write_catalog();
        catalog.set_search(term);
        catalog.view()
    }

    pub fn go_to_page(&self, page: usize) -> CatalogPage {
        let mut catalog = self.write_catalog();
        catalog.set_page(page);
        catalog.view()
    }

    pub fn current_page(&self) -> CatalogPage {
        self.read_catalog().view()
    }

    /// Every row matching the search term, across all pages
    pub fn filtered_movies(&self) -> Vec<MovieRecord> {
        self.read_catalog()
            .filtered()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &MovieId) -> Option<MovieRecord> {
        self.read_catalog().find(id).cloned()
    }

    fn read_catalog(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.catalog.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_catalog(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.catalog.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MovieField, ValidationRule};
    use crate::error::TransportError;
    use crate::integrations::MockMovieClient;
    use mockall::Sequence;

    fn movie(id: &str, name: &str) -> MovieRecord {
        MovieRecord {
            id: Some(MovieId::new(id)),
            name: name.to_string(),
            duration: "2h".to_string(),
            rating: 7.0,
        }
    }

    fn server_error() -> TransportError {
        TransportError::Status {
            url: "http://localhost:8585/test".to_string(),
            status: 500,
            body: "boom".to_string(),
        }
    }

    fn service(client: MockMovieClient) -> (MovieService, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        (MovieService::new(Arc::new(client), 2, bus.clone()), bus)
    }

    #[tokio::test]
    async fn test_load_replaces_catalog() {
        let mut client = MockMovieClient::new();
        client
            .expect_list_movies()
            .times(1)
            .returning(|| Ok(vec![movie("1", "Dune"), movie("2", "Alien"), movie("3", "Heat")]));

        let (service, bus) = service(client);
        let view = service.load().await.unwrap();

        assert_eq!(view.total_count, 3);
        assert_eq!(view.page_count, 2);
        assert_eq!(view.movies.len(), 2);
        assert_eq!(bus.get_event_log()[0].event_type, "CatalogLoaded");
    }

    #[tokio::test]
    async fn test_create_forwards_valid_draft_then_refreshes() {
        let mut client = MockMovieClient::new();
        let mut seq = Sequence::new();

        client
            .expect_create_movie()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|record| {
                record.id.is_none()
                    && record.name == "Dune"
                    && record.duration == "2h"
                    && record.rating == 8.0
            })
            .returning(|record| {
                Ok(MovieRecord {
                    id: Some(MovieId::new("10")),
                    ..record.clone()
                })
            });
        client
            .expect_list_movies()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![movie("10", "Dune")]));

        let (service, bus) = service(client);
        let saved = service
            .create(MovieDraft::new("Dune", "2h", Some(8.0)))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(MovieId::new("10")));
        assert_eq!(service.current_page().total_count, 1);

        let events: Vec<String> = bus.get_event_log().into_iter().map(|e| e.event_type).collect();
        assert_eq!(events, vec!["MovieCreated", "CatalogLoaded"]);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_client() {
        let client = MockMovieClient::new();
        let (service, bus) = service(client);

        let err = service
            .create(MovieDraft::new("", "", None))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 3);
                assert_eq!(
                    errors.get(MovieField::Duration).map(|e| e.rule),
                    Some(ValidationRule::Required)
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(bus.get_event_log().is_empty());
    }

    #[tokio::test]
    async fn test_update_uses_draft_id() {
        let mut client = MockMovieClient::new();
        client
            .expect_update_movie()
            .times(1)
            .withf(|id, record| id.as_str() == "7" && record.duration == "95m")
            .returning(|_, record| Ok(record.clone()));
        client
            .expect_list_movies()
            .times(1)
            .returning(|| Ok(vec![movie("7", "Heat")]));

        let (service, _bus) = service(client);
        let draft = MovieDraft::new("Heat", "95m", Some(8.3)).with_id(MovieId::new("7"));

        let saved = service.update(draft).await.unwrap();
        assert_eq!(saved.duration, "95m");
    }

    #[tokio::test]
    async fn test_update_validates_like_create() {
        let client = MockMovieClient::new();
        let (service, _bus) = service(client);

        let draft = MovieDraft::new("Heat", "1.5h", Some(8.0)).with_id(MovieId::new("7"));
        let err = service.update(draft).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_without_id_is_rejected() {
        let client = MockMovieClient::new();
        let (service, _bus) = service(client);

        let err = service
            .update(MovieDraft::new("Heat", "2h", Some(8.0)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingId));
    }

    #[tokio::test]
    async fn test_delete_skips_validation_and_refreshes() {
        let mut client = MockMovieClient::new();
        client
            .expect_delete_movie()
            .times(1)
            .withf(|id| id.as_str() == "1")
            .returning(|_| Ok(()));
        client
            .expect_list_movies()
            .times(1)
            .returning(|| Ok(vec![movie("2", "Alien")]));

        let (service, bus) = service(client);
        service.delete(&MovieId::new("1")).await.unwrap();

        assert!(service.find(&MovieId::new("1")).is_none());
        assert_eq!(bus.get_event_log()[0].event_type, "MovieDeleted");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_catalog_unchanged() {
        let mut client = MockMovieClient::new();
        client
            .expect_list_movies()
            .times(1)
            .returning(|| Ok(vec![movie("1", "Dune")]));
        client
            .expect_create_movie()
            .times(1)
            .returning(|_| Err(server_error()));

        let (service, _bus) = service(client);
        service.load().await.unwrap();

        let err = service
            .create(MovieDraft::new("Alien", "117m", Some(8.5)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Transport(TransportError::Status { status: 500, .. })));
        assert_eq!(service.filtered_movies(), vec![movie("1", "Dune")]);
    }

    #[tokio::test]
    async fn test_failed_load_is_surfaced() {
        let mut client = MockMovieClient::new();
        client
            .expect_list_movies()
            .times(1)
            .returning(|| Err(server_error()));

        let (service, _bus) = service(client);
        assert!(matches!(service.load().await, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_search_and_paging_over_loaded_list() {
        let mut client = MockMovieClient::new();
        client.expect_list_movies().times(1).returning(|| {
            Ok(vec![
                movie("1", "Alien"),
                movie("2", "Aliens"),
                movie("3", "Alien 3"),
                movie("4", "Dune"),
            ])
        });

        let (service, _bus) = service(client);
        service.load().await.unwrap();

        let view = service.search("ALIEN");
        assert_eq!(view.filtered_count, 3);
        assert_eq!(view.page_count, 2);

        let view = service.go_to_page(2);
        assert_eq!(view.page, 2);
        assert_eq!(view.movies[0].name, "Alien 3");

        assert_eq!(service.filtered_movies().len(), 3);
    }
}
