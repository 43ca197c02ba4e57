//! Song records and the optional numeric fields a catalog may carry.

use serde::Serialize;
use std::fmt;

/// Optional numeric column of a song.
///
/// Not every dataset carries every field; which ones a catalog provides is
/// recorded in its schema (see [`crate::catalog::Catalog::has_field`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Popularity,
    DurationMin,
    Valence,
    Energy,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Popularity,
        Field::DurationMin,
        Field::Valence,
        Field::Energy,
    ];

    /// Normalized column name used by catalog sources.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Field::Popularity => "popularity",
            Field::DurationMin => "duration_min",
            Field::Valence => "valence",
            Field::Energy => "energy",
        }
    }

    /// Reverse of [`Field::column`]. Expects an already normalized name.
    #[must_use]
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One catalog row.
///
/// Immutable once loaded: the engine only ever borrows songs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    pub track_name: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
}

impl Song {
    #[must_use]
    pub fn new(track_name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            track_name: track_name.into(),
            artist: artist.into(),
            popularity: None,
            duration_min: None,
            valence: None,
            energy: None,
        }
    }

    /// Builder-style setter for a numeric field.
    ///
    /// Non-finite values are stored as absent, same as the loader does.
    #[must_use]
    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub(crate) fn set(&mut self, field: Field, value: f64) {
        let value = value.is_finite().then_some(value);
        match field {
            Field::Popularity => self.popularity = value,
            Field::DurationMin => self.duration_min = value,
            Field::Valence => self.valence = value,
            Field::Energy => self.energy = value,
        }
    }

    /// Value of `field`, or `None` when the row has no usable number for it.
    #[must_use]
    pub const fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Popularity => self.popularity,
            Field::DurationMin => self.duration_min,
            Field::Valence => self.valence,
            Field::Energy => self.energy,
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.track_name, self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_column_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_column(field.column()), Some(field));
        }
        assert_eq!(Field::from_column("tempo"), None);
        // Lookup is on normalized names only.
        assert_eq!(Field::from_column("Popularity"), None);
    }

    #[test]
    fn test_with_sets_only_requested_field() {
        let song = Song::new("Sunny Day", "A").with(Field::Popularity, 90.0);

        assert_eq!(song.value(Field::Popularity), Some(90.0));
        assert_eq!(song.value(Field::Valence), None);
        assert_eq!(song.value(Field::Energy), None);
        assert_eq!(song.value(Field::DurationMin), None);
    }

    #[test]
    fn test_non_finite_values_are_absent() {
        let song = Song::new("Glitch", "B")
            .with(Field::Energy, f64::NAN)
            .with(Field::Valence, f64::INFINITY);

        assert_eq!(song.energy, None);
        assert_eq!(song.valence, None);
    }

    #[test]
    fn test_display_format() {
        let song = Song::new("Love Story", "Taylor Swift");
        assert_eq!(song.to_string(), "Love Story by Taylor Swift");
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let song = Song::new("Sunny Day", "A").with(Field::Popularity, 90.0);
        let json = serde_json::to_value(&song).unwrap();

        assert_eq!(json["track_name"], "Sunny Day");
        assert_eq!(json["popularity"], 90.0);
        assert!(json.get("valence").is_none());
    }
}
