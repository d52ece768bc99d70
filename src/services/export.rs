// src/services/export.rs
//
// Export of the currently filtered movie list as plain text or CSV.
// Pure string building; saving is done by infrastructure::ExportWriter.

use std::fmt;
use std::str::FromStr;

use crate::domain::MovieRecord;

pub const TEXT_EXPORT_FILE_NAME: &str = "movie-list.txt";
pub const CSV_EXPORT_FILE_NAME: &str = "movies.csv";

const CSV_HEADERS: [&str; 3] = ["Movie Name", "Duration (hours)", "Rating"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Text => TEXT_EXPORT_FILE_NAME,
            ExportFormat::Csv => CSV_EXPORT_FILE_NAME,
        }
    }

    pub fn render<'a>(&self, movies: impl IntoIterator<Item = &'a MovieRecord>) -> String {
        match self {
            ExportFormat::Text => to_text(movies),
            ExportFormat::Csv => to_csv(movies),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

/// One `Name/Duration/Rating` block per movie, blocks separated by a blank line
pub fn to_text<'a>(movies: impl IntoIterator<Item = &'a MovieRecord>) -> String {
    movies
        .into_iter()
        .map(|movie| {
            format!(
                "Name: {}\nDuration: {}\nRating: {}\n\n",
                movie.name, movie.duration, movie.rating
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header row plus one row per movie, every field quoted
pub fn to_csv<'a>(movies: impl IntoIterator<Item = &'a MovieRecord>) -> String {
    let mut rows = vec![csv_row(CSV_HEADERS.iter().map(|h| h.to_string()))];

    rows.extend(movies.into_iter().map(|movie| {
        csv_row([
            movie.name.clone(),
            movie.duration.clone(),
            movie.rating.to_string(),
        ])
    }));

    rows.join("\n")
}

fn csv_row(fields: impl IntoIterator<Item = String>) -> String {
    fields
        .into_iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}
