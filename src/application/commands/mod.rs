// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs, return DTOs
// - Commands convert errors into ErrorResponse
// - Commands NEVER contain business logic

pub mod export_commands;
pub mod movie_commands;

pub use export_commands::*;
pub use movie_commands::*;
