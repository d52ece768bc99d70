// src/application/commands/export_commands.rs
//
// Export Command Handlers

use crate::application::{
    dto::ExportResultDto,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};
use crate::services::ExportFormat;

/// Save the filtered list as `movie-list.txt` (`"text"`) or `movies.csv` (`"csv"`)
pub fn export_movies(state: &AppState, format: &str) -> Result<ExportResultDto, ErrorResponse> {
    let format: ExportFormat = format.parse().map_err(ErrorResponse::validation)?;

    let outcome = state.export_service.export(format).to_error_response()?;
    Ok(outcome.into())
}
