// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the domain
// but are not part of the domain itself.

pub mod export_writer;

pub use export_writer::ExportWriter;
