// src/events/handlers/mod.rs
//
// Event Handlers - INTERNAL MODULE
//
// Handlers use closure-based subscription via EventBus::subscribe.
// EventHandler type is internal to the bus module and NOT exported.

pub mod activity_handler;

pub use activity_handler::register_activity_handlers;
