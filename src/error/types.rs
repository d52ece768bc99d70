// src/error/types.rs
use crate::domain::ValidationErrors;
use serde::Serialize;
use thiserror::Error;

/// Failures of a single exchange with the movie server
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned status {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid base URL {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Movie has no id")]
    MissingId,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|url| url.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        TransportError::Request { url, source: err }
    }
}

pub type AppResult<T> = Result<T, AppError>;
