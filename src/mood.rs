//! Moods: named predicates over songs.
//!
//! A mood is one of three kinds:
//! - **threshold**: every `field OP threshold` condition must hold
//! - **keyword**: the title contains any keyword, case-insensitively
//! - **unconditional**: every song qualifies
//!
//! The built-in set is fixed and reachable through [`MoodKey`].

use crate::song::{Field, Song};
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Numeric comparison applied by a threshold condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Comparison {
    #[must_use]
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Greater => value > threshold,
            Comparison::GreaterOrEqual => value >= threshold,
            Comparison::Less => value < threshold,
            Comparison::LessOrEqual => value <= threshold,
        }
    }

    const fn symbol(self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
        }
    }
}

/// `field OP threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition {
    pub field: Field,
    pub op: Comparison,
    pub threshold: f64,
}

impl Condition {
    #[must_use]
    pub const fn new(field: Field, op: Comparison, threshold: f64) -> Self {
        Self {
            field,
            op,
            threshold,
        }
    }

    /// A row without a value for the field never satisfies the condition.
    #[must_use]
    pub fn matches(&self, song: &Song) -> bool {
        song.value(self.field)
            .is_some_and(|value| self.op.holds(value, self.threshold))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op.symbol(), self.threshold)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Threshold(Vec<Condition>),
    /// Lower-cased, non-blank keywords.
    Keyword(Vec<String>),
    Unconditional,
}

/// A named predicate over [`Song`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mood {
    key: String,
    name: String,
    predicate: Predicate,
}

impl Mood {
    #[must_use]
    pub fn threshold(
        key: impl Into<String>,
        name: impl Into<String>,
        conditions: Vec<Condition>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            predicate: Predicate::Threshold(conditions),
        }
    }

    /// Keywords are lower-cased; blank ones are dropped so they cannot match
    /// every title.
    #[must_use]
    pub fn keyword<I, S>(key: impl Into<String>, name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self {
            key: key.into(),
            name: name.into(),
            predicate: Predicate::Keyword(keywords),
        }
    }

    #[must_use]
    pub fn unconditional(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            predicate: Predicate::Unconditional,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Optional fields the catalog must declare before this mood can be
    /// evaluated. Keyword moods only read the mandatory title.
    #[must_use]
    pub fn required_fields(&self) -> Vec<Field> {
        match &self.predicate {
            Predicate::Threshold(conditions) => {
                let mut fields: Vec<Field> = conditions.iter().map(|c| c.field).collect();
                fields.sort_unstable();
                fields.dedup();
                fields
            }
            Predicate::Keyword(_) | Predicate::Unconditional => Vec::new(),
        }
    }

    #[must_use]
    pub fn matches(&self, song: &Song) -> bool {
        match &self.predicate {
            Predicate::Threshold(conditions) => conditions.iter().all(|c| c.matches(song)),
            Predicate::Keyword(keywords) => {
                let title = song.track_name.to_lowercase();
                keywords.iter().any(|keyword| title.contains(keyword.as_str()))
            }
            Predicate::Unconditional => true,
        }
    }

    /// Human readable rule, e.g. `energy < 0.4 and valence > 0.5`.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.predicate {
            Predicate::Threshold(conditions) => conditions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" and "),
            Predicate::Keyword(keywords) if keywords.is_empty() => "matches nothing".to_string(),
            Predicate::Keyword(keywords) => format!("title contains {}", keywords.join(" or ")),
            Predicate::Unconditional => "any song".to_string(),
        }
    }
}

/// The fixed set of built-in moods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum MoodKey {
    /// Popularity above 85
    Popular,
    /// Longer than four minutes
    #[value(alias = "long-songs")]
    Long,
    /// Shorter than three minutes
    #[value(alias = "short-songs")]
    Short,
    /// Valence above 0.7
    Happy,
    /// Low energy, positive valence
    Chill,
    /// Titles about love
    Romantic,
    /// Anything goes
    Random,
}

lazy_static::lazy_static! {
    /// Built-in mood definitions, indexed in [`MoodKey::ALL`] order.
    static ref BUILTIN_MOODS: Vec<Mood> = MoodKey::ALL.iter().map(|key| key.build()).collect();
}

impl MoodKey {
    pub const ALL: [MoodKey; 7] = [
        MoodKey::Popular,
        MoodKey::Long,
        MoodKey::Short,
        MoodKey::Happy,
        MoodKey::Chill,
        MoodKey::Romantic,
        MoodKey::Random,
    ];

    /// Definition of this mood.
    #[must_use]
    pub fn mood(self) -> &'static Mood {
        &BUILTIN_MOODS[self as usize]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MoodKey::Popular => "popular",
            MoodKey::Long => "long",
            MoodKey::Short => "short",
            MoodKey::Happy => "happy",
            MoodKey::Chill => "chill",
            MoodKey::Romantic => "romantic",
            MoodKey::Random => "random",
        }
    }

    fn build(self) -> Mood {
        use Comparison::{Greater, Less};

        let key = self.as_str();
        match self {
            MoodKey::Popular => Mood::threshold(
                key,
                "Popular",
                vec![Condition::new(Field::Popularity, Greater, 85.0)],
            ),
            MoodKey::Long => Mood::threshold(
                key,
                "Long Songs",
                vec![Condition::new(Field::DurationMin, Greater, 4.0)],
            ),
            MoodKey::Short => Mood::threshold(
                key,
                "Short Songs",
                vec![Condition::new(Field::DurationMin, Less, 3.0)],
            ),
            MoodKey::Happy => Mood::threshold(
                key,
                "Happy",
                vec![Condition::new(Field::Valence, Greater, 0.7)],
            ),
            MoodKey::Chill => Mood::threshold(
                key,
                "Chill",
                vec![
                    Condition::new(Field::Energy, Less, 0.4),
                    Condition::new(Field::Valence, Greater, 0.5),
                ],
            ),
            MoodKey::Romantic => Mood::keyword(key, "Romantic", ["love", "heart"]),
            MoodKey::Random => Mood::unconditional(key, "Random"),
        }
    }
}

impl fmt::Display for MoodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts a key (`long`) or a display name (`Long Songs`), ignoring case,
/// spaces, dashes and underscores.
impl FromStr for MoodKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        MoodKey::ALL
            .into_iter()
            .find(|key| squash(key.as_str()) == wanted || squash(key.mood().name()) == wanted)
            .ok_or_else(|| format!("unknown mood '{}'", s.trim()))
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
