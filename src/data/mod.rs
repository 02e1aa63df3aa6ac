//! Loading of the TMDB metadata files
//!
//! Rows that can't be deserialized are skipped with a warning; a file that
//! can't be opened or read fails the whole load.
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
    error::AppResult,
    models::{CreditRow, MovieRow},
};

pub fn load_movies(path: impl AsRef<Path>) -> AppResult<Vec<MovieRow>> {
    load_csv(path.as_ref())
}

pub fn load_credits(path: impl AsRef<Path>) -> AppResult<Vec<CreditRow>> {
    load_csv(path.as_ref())
}

fn load_csv<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let file = std::fs::File::open(path)?;
    let rows = read_rows(file, &path.display().to_string())?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Metadata file loaded");

    Ok(rows)
}

/// Deserializes CSV rows by header name, ignoring unknown columns
pub fn read_rows<T: DeserializeOwned, R: Read>(reader: R, source: &str) -> AppResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    // Fail early on an unreadable header rather than skipping every row
    csv_reader.headers()?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (line, record) in csv_reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                tracing::warn!(source = %source, row = line + 1, error = %e, "Skipping unreadable row");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(source = %source, skipped, kept = rows.len(), "Some rows were skipped");
    }

    Ok(rows)
}
