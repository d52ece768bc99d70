// src/integrations/mod.rs
//
// External Integrations Module

pub mod movie_api;

pub use movie_api::client::{HttpMovieClient, MovieClient};

#[cfg(test)]
pub use movie_api::client::MockMovieClient;
