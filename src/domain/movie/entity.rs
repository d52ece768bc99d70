use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use super::invariants::validate_movie;
use crate::domain::ValidationErrors;

/// Server-assigned identifier
///
/// Opaque to the client. The server may hand it out as a JSON string or a
/// JSON integer; both end up here as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self(TextOrNumber::deserialize(deserializer)?.into_text()))
    }
}

/// A movie as the server knows it
///
/// `duration` is the raw token (`"120m"`, `"2h"`), never normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireMovie")]
pub struct MovieRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,

    pub name: String,

    pub duration: String,

    pub rating: f64,
}

impl MovieRecord {
    /// The body sent to the create endpoint
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

/// Raw form input for a movie, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub id: Option<MovieId>,
    pub name: String,
    pub duration: String,
    /// `None` when the rating input was empty or not a number
    pub rating: Option<f64>,
}

impl MovieDraft {
    pub fn new(name: impl Into<String>, duration: impl Into<String>, rating: Option<f64>) -> Self {
        Self {
            id: None,
            name: name.into(),
            duration: duration.into(),
            rating,
        }
    }

    pub fn with_id(mut self, id: MovieId) -> Self {
        self.id = Some(id);
        self
    }

    /// Prefills the edit form from a row of the table
    pub fn from_record(record: &MovieRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            duration: record.duration.clone(),
            rating: Some(record.rating),
        }
    }

    /// Validates every field and, if all pass, yields the record to submit
    pub fn into_record(self) -> Result<MovieRecord, ValidationErrors> {
        validate_movie(&self)?;

        Ok(MovieRecord {
            id: self.id,
            name: self.name,
            duration: self.duration,
            // present: validate_movie rejects a missing rating
            rating: self.rating.unwrap_or_default(),
        })
    }
}

// ============================================================================
// WIRE LENIENCY
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }
    }
}

/// A movie as it arrives over the wire
///
/// Mongo-backed servers send `_id`, sometimes next to an `id` virtual.
/// `id` wins when both are present.
#[derive(Deserialize)]
struct WireMovie {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    id: Option<MovieId>,

    #[serde(default, rename = "_id", deserialize_with = "deserialize_optional_id")]
    mongo_id: Option<MovieId>,

    name: String,

    #[serde(deserialize_with = "deserialize_duration")]
    duration: String,

    #[serde(deserialize_with = "deserialize_rating")]
    rating: f64,
}

impl From<WireMovie> for MovieRecord {
    fn from(wire: WireMovie) -> Self {
        Self {
            id: wire.id.or(wire.mongo_id),
            name: wire.name,
            duration: wire.duration,
            rating: wire.rating,
        }
    }
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<MovieId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<MovieId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_empty()))
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(TextOrNumber::deserialize(deserializer)?.into_text())
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| de::Error::custom("rating is not representable as f64")),
        serde_json::Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("rating {:?} is not a number", text))),
        other => Err(de::Error::custom(format!(
            "rating must be a number or numeric text, got {}",
            other
        ))),
    }
}
