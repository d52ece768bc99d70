// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between the UI (console) and the services
// - Translates between DTOs and domain types
// - Maps every error to an ErrorResponse the UI can show

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
