//! In-memory song catalog and its declared schema.

use crate::song::{Field, Song};
use std::collections::BTreeSet;

/// Ordered, read-only collection of songs.
///
/// Besides the rows, a catalog records which optional numeric [`Field`]s its
/// source provided. A field can be declared yet absent on individual rows;
/// that is a per-row gap, not a schema mismatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    songs: Vec<Song>,
    fields: BTreeSet<Field>,
}

impl Catalog {
    /// Build a catalog with an explicitly declared schema.
    #[must_use]
    pub fn new(songs: Vec<Song>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            songs,
            fields: fields.into_iter().collect(),
        }
    }

    /// Build a catalog whose schema holds every field set on at least one row.
    #[must_use]
    pub fn infer(songs: Vec<Song>) -> Self {
        let fields = Field::ALL
            .into_iter()
            .filter(|&field| songs.iter().any(|song| song.value(field).is_some()))
            .collect();
        Self { songs, fields }
    }

    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    #[must_use]
    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Declared optional fields, in [`Field`] order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }

    /// Fields from `required` that this catalog does not declare.
    #[must_use]
    pub fn missing_fields(&self, required: &[Field]) -> Vec<Field> {
        let mut missing: Vec<Field> = required
            .iter()
            .copied()
            .filter(|field| !self.has_field(*field))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}
