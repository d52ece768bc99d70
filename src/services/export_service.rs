// src/services/export_service.rs
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::AppResult;
use crate::events::{CatalogExported, EventBus};
use crate::infrastructure::ExportWriter;
use crate::services::export::ExportFormat;
use crate::services::movie_service::MovieService;

/// Where an export went and how many rows it held
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub movie_count: usize,
}

/// Renders the filtered list and hands it to the file writer
pub struct ExportService {
    movie_service: Arc<MovieService>,
    writer: ExportWriter,
    event_bus: Arc<EventBus>,
}

impl ExportService {
    pub fn new(
        movie_service: Arc<MovieService>,
        writer: ExportWriter,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            movie_service,
            writer,
            event_bus,
        }
    }

    /// Render the current export without saving it
    pub fn render(&self, format: ExportFormat) -> String {
        format.render(&self.movie_service.filtered_movies())
    }

    pub fn export(&self, format: ExportFormat) -> AppResult<ExportOutcome> {
        let movies = self.movie_service.filtered_movies();
        let contents = format.render(&movies);
        let path = self.writer.save(format.file_name(), &contents)?;

        self.event_bus.emit(CatalogExported::new(
            format.to_string(),
            path.clone(),
            movies.len(),
        ));

        Ok(ExportOutcome {
            format,
            path,
            movie_count: movies.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MovieId, MovieRecord};
    use crate::integrations::MockMovieClient;
    use std::fs;

    fn movie(id: &str, name: &str, duration: &str, rating: f64) -> MovieRecord {
        MovieRecord {
            id: Some(MovieId::new(id)),
            name: name.to_string(),
            duration: duration.to_string(),
            rating,
        }
    }

    async fn loaded_service(dir: &std::path::Path) -> (ExportService, Arc<MovieService>, Arc<EventBus>) {
        let mut client = MockMovieClient::new();
        client.expect_list_movies().returning(|| {
            Ok(vec![
                movie("1", "Dune", "2h", 8.0),
                movie("2", "Alien", "117m", 8.5),
                movie("3", "Aliens", "137m", 8.4),
            ])
        });

        let bus = Arc::new(EventBus::new());
        let movie_service = Arc::new(MovieService::new(Arc::new(client), 1, bus.clone()));
        movie_service.load().await.unwrap();

        let export_service =
            ExportService::new(movie_service.clone(), ExportWriter::new(dir), bus.clone());
        (export_service, movie_service, bus)
    }

    #[tokio::test]
    async fn test_export_uses_filtered_list_across_pages() {
        let dir = tempfile::tempdir().unwrap();
        let (export_service, movie_service, _bus) = loaded_service(dir.path()).await;
        movie_service.search("alien");

        let outcome = export_service.export(ExportFormat::Csv).unwrap();

        assert_eq!(outcome.movie_count, 2);
        assert_eq!(outcome.path, dir.path().join("movies.csv"));
        assert_eq!(
            fs::read_to_string(&outcome.path).unwrap(),
            "\"Movie Name\",\"Duration (hours)\",\"Rating\"\n\
             \"Alien\",\"117m\",\"8.5\"\n\
             \"Aliens\",\"137m\",\"8.4\""
        );
    }

    #[tokio::test]
    async fn test_text_export_writes_movie_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let (export_service, movie_service, bus) = loaded_service(dir.path()).await;
        movie_service.search("dune");

        let outcome = export_service.export(ExportFormat::Text).unwrap();

        assert_eq!(outcome.path, dir.path().join("movie-list.txt"));
        assert_eq!(
            fs::read_to_string(&outcome.path).unwrap(),
            "Name: Dune\nDuration: 2h\nRating: 8\n\n"
        );
        assert_eq!(bus.get_event_log().last().unwrap().event_type, "CatalogExported");
    }

    #[tokio::test]
    async fn test_render_matches_saved_contents() {
        let dir = tempfile::tempdir().unwrap();
        let (export_service, _movie_service, _bus) = loaded_service(dir.path()).await;

        let rendered = export_service.render(ExportFormat::Text);
        let outcome = export_service.export(ExportFormat::Text).unwrap();
        assert_eq!(fs::read_to_string(outcome.path).unwrap(), rendered);
    }
}
