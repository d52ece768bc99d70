// src/app/mod.rs
//
// Application wiring and the console front end.

pub mod bootstrap;
pub mod console;

pub use bootstrap::init_app_state;
pub use console::{render_page, Console, ConsoleCommand};
