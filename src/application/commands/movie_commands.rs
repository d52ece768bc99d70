// src/application/commands/movie_commands.rs
//
// Movie Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};
use crate::domain::MovieId;

/// Parse an id typed or clicked in the UI
fn parse_movie_id(movie_id: &str) -> Result<MovieId, ErrorResponse> {
    let movie_id = movie_id.trim();
    if movie_id.is_empty() {
        return Err(ErrorResponse::validation("Movie id is required".to_string()));
    }
    Ok(MovieId::new(movie_id))
}

/// Fetch the list from the server and show the current page
pub async fn refresh_movies(state: &AppState) -> Result<CatalogPageDto, ErrorResponse> {
    let view = state.movie_service.load().await.to_error_response()?;
    Ok(view.into())
}

/// The page currently shown, without touching the server
pub fn current_movies(state: &AppState) -> CatalogPageDto {
    state.movie_service.current_page().into()
}

pub fn search_movies(state: &AppState, term: &str) -> CatalogPageDto {
    state.movie_service.search(term).into()
}

pub fn go_to_page(state: &AppState, page: usize) -> CatalogPageDto {
    state.movie_service.go_to_page(page).into()
}

/// Prefill the edit dialog for a row
pub fn get_movie_form(state: &AppState, movie_id: &str) -> Result<MovieFormDto, ErrorResponse> {
    let id = parse_movie_id(movie_id)?;
    state
        .movie_service
        .find(&id)
        .map(|record| MovieFormDto::from(&record))
        .ok_or_else(|| ErrorResponse::not_found("Movie"))
}

/// Submit the "add movie" dialog
pub async fn create_movie(
    state: &AppState,
    form: MovieFormDto,
) -> Result<MovieDto, ErrorResponse> {
    let saved = state
        .movie_service
        .create(form.into_draft(None))
        .await
        .to_error_response()?;
    Ok(saved.into())
}

/// Submit the edit dialog for an existing row
pub async fn update_movie(
    state: &AppState,
    movie_id: &str,
    form: MovieFormDto,
) -> Result<MovieDto, ErrorResponse> {
    let id = parse_movie_id(movie_id)?;
    let saved = state
        .movie_service
        .update(form.into_draft(Some(id)))
        .await
        .to_error_response()?;
    Ok(saved.into())
}

pub async fn delete_movie(state: &AppState, movie_id: &str) -> Result<(), ErrorResponse> {
    let id = parse_movie_id(movie_id)?;
    state.movie_service.delete(&id).await.to_error_response()
}
