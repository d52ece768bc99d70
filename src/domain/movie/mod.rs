pub mod entity;
pub mod invariants;

pub use entity::{MovieDraft, MovieId, MovieRecord};
pub use invariants::{
    parse_duration_token, validate_duration, validate_movie, validate_name, validate_rating,
    DurationUnit,
};
