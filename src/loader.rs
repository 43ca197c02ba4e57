//! Catalog loading from comma-separated UTF-8 files.
//!
//! Column names are trimmed and lower-cased before matching, so
//! `" Track_Name"` and `track_name` are the same column. The title and
//! artist columns are mandatory; the numeric [`Field`] columns are optional
//! and whichever are present become the catalog schema.

use crate::catalog::Catalog;
use crate::error::LoadError;
use crate::song::{Field, Song};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

const DURATION_MS_COLUMN: &str = "duration_ms";

/// Which source columns feed the mandatory song fields.
///
/// Each list holds aliases tried in order; the first normalized match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default = "default_title_columns")]
    pub title_columns: Vec<String>,
    #[serde(default = "default_artist_columns")]
    pub artist_columns: Vec<String>,
}

fn default_title_columns() -> Vec<String> {
    vec!["track_name".to_string()]
}

fn default_artist_columns() -> Vec<String> {
    vec![
        "artist".to_string(),
        "artist_name".to_string(),
        "artists".to_string(),
    ]
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            title_columns: default_title_columns(),
            artist_columns: default_artist_columns(),
        }
    }
}

/// Read and parse the catalog at `path`.
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be read, otherwise anything
/// [`parse_catalog`] reports.
pub fn load_catalog(path: &Path, config: &LoaderConfig) -> Result<Catalog, LoadError> {
    debug!("Loading catalog from {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&content, config)?;
    info!(
        "Loaded {} songs from {} (fields: {:?})",
        catalog.len(),
        path.display(),
        catalog.fields().collect::<Vec<_>>()
    );
    Ok(catalog)
}

/// Parse CSV text into a [`Catalog`].
///
/// Rows shorter than the header are padded with empty cells. Rows with an
/// empty title or artist are skipped. Numeric cells that are empty or not
/// finite numbers are treated as absent.
///
/// # Errors
///
/// - [`LoadError::Empty`] when there is no header
/// - [`LoadError::SchemaMismatch`] when the title or artist column is missing
/// - [`LoadError::MalformedRow`] when a row has more cells than the header
/// - [`LoadError::UnterminatedQuote`] when a quoted field runs to end of input
pub fn parse_catalog(content: &str, config: &LoaderConfig) -> Result<Catalog, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = parse_records(content)?.into_iter();

    let (_, header) = records.next().ok_or(LoadError::Empty)?;
    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(index, name)| (normalize_column(name), index))
        .rev() // first occurrence wins on duplicate names
        .collect();

    let title_at = find_column(&columns, &config.title_columns, "track_name")?;
    let artist_at = find_column(&columns, &config.artist_columns, "artist")?;

    let numeric: Vec<(Field, usize)> = Field::ALL
        .into_iter()
        .filter_map(|field| columns.get(field.column()).map(|&index| (field, index)))
        .collect();
    let duration_ms_at = if columns.contains_key(Field::DurationMin.column()) {
        None
    } else {
        columns.get(DURATION_MS_COLUMN).copied()
    };

    let mut fields: BTreeSet<Field> = numeric.iter().map(|(field, _)| *field).collect();
    if duration_ms_at.is_some() {
        debug!("Deriving duration_min from duration_ms");
        fields.insert(Field::DurationMin);
    }

    let mut songs = Vec::new();
    let mut skipped = 0usize;
    for (line, cells) in records {
        if cells.len() > header.len() {
            return Err(LoadError::MalformedRow {
                line,
                expected: header.len(),
                found: cells.len(),
            });
        }
        let cell = |index: usize| cells.get(index).map_or("", |value| value.trim());

        let title = cell(title_at);
        let artist = cell(artist_at);
        if title.is_empty() || artist.is_empty() {
            warn!("Skipping row {line}: missing title or artist");
            skipped += 1;
            continue;
        }

        let mut song = Song::new(title, artist);
        for &(field, index) in &numeric {
            if let Some(value) = parse_number(cell(index)) {
                song.set(field, value);
            }
        }
        if let Some(index) = duration_ms_at {
            if let Some(ms) = parse_number(cell(index)) {
                song.set(Field::DurationMin, ms / 60_000.0);
            }
        }
        songs.push(song);
    }

    if skipped > 0 {
        warn!("Skipped {skipped} incomplete rows");
    }
    Ok(Catalog::new(songs, fields))
}

/// Trim and lower-case a column name.
#[must_use]
pub fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase()
}

fn find_column(
    columns: &HashMap<String, usize>,
    aliases: &[String],
    role: &'static str,
) -> Result<usize, LoadError> {
    aliases
        .iter()
        .find_map(|alias| columns.get(&normalize_column(alias)).copied())
        .ok_or_else(|| LoadError::SchemaMismatch {
            column: role,
            expected: aliases.to_vec(),
        })
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Split CSV text into records, each tagged with the line it starts on.
///
/// Handles double-quoted fields with `""` escapes and embedded commas or
/// newlines. Blank lines are ignored. A quote still open at end of input is
/// an error rather than one giant cell.
fn parse_records(content: &str) -> Result<Vec<(usize, Vec<String>)>, LoadError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            _ => {
                if c == '\n' {
                    line += 1;
                }
                current.push(c);
            }
        }
    }
    if in_quotes {
        return Err(LoadError::UnterminatedQuote { line: record_line });
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        push_record(&mut records, record_line, fields);
    }
    Ok(records)
}

fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        records.push((line, fields));
    }
}
