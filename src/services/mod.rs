// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog;
pub mod export;
pub mod export_service;
pub mod movie_service;

pub use catalog::{CatalogPage, CatalogState};

pub use export::ExportFormat;

pub use export_service::{ExportOutcome, ExportService};

pub use movie_service::MovieService;
