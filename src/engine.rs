//! Mood filtering and random sampling over a [`Catalog`].
//!
//! The free functions are the pure core: they borrow the catalog, never
//! mutate it, and take the random source as an argument. [`MoodEngine`]
//! bundles them with the caller's display settings.

use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::mood::Mood;
use crate::song::Song;
use log::{debug, trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of songs shown per recommendation unless configured otherwise.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Songs of `catalog` satisfying `mood`, in catalog order.
///
/// The mood's required fields are checked against the catalog schema before
/// any row is scanned. An empty result is a valid outcome ("no matches") and
/// is left to the caller to present.
///
/// # Errors
///
/// [`EngineError::SchemaMismatch`] when the catalog does not declare a field
/// the mood reads.
pub fn filter<'a>(catalog: &'a Catalog, mood: &Mood) -> Result<Vec<&'a Song>, EngineError> {
    let missing = catalog.missing_fields(&mood.required_fields());
    if !missing.is_empty() {
        warn!(
            "Mood `{}' cannot be evaluated, catalog lacks {:?}",
            mood.key(),
            missing
        );
        return Err(EngineError::SchemaMismatch {
            mood: mood.key().to_string(),
            missing,
        });
    }

    let subset: Vec<&Song> = catalog
        .songs()
        .iter()
        .filter(|song| {
            let keep = mood.matches(song);
            let verdict = if keep { "matches" } else { "fails" };
            trace!("`{}' {verdict} mood `{}'", song.track_name, mood.key());
            keep
        })
        .collect();

    debug!(
        "Mood `{}' kept {} of {} songs",
        mood.key(),
        subset.len(),
        catalog.len()
    );
    Ok(subset)
}

/// Uniformly draws `min(k, subset.len())` distinct songs, without
/// replacement. Order of the result is unspecified.
///
/// # Errors
///
/// - [`EngineError::InvalidSampleSize`] when `k` is zero
/// - [`EngineError::EmptySelection`] when `subset` is empty
pub fn sample<'a, R>(
    subset: &[&'a Song],
    k: usize,
    rng: &mut R,
) -> Result<Vec<&'a Song>, EngineError>
where
    R: Rng + ?Sized,
{
    if k == 0 {
        return Err(EngineError::InvalidSampleSize);
    }
    if subset.is_empty() {
        return Err(EngineError::EmptySelection);
    }

    let chosen: Vec<&Song> = subset.choose_multiple(rng, k).copied().collect();
    debug!("Sampled {} of {} songs (asked for {k})", chosen.len(), subset.len());
    Ok(chosen)
}

/// One uniformly random song from the whole catalog ("mystery pick").
///
/// # Errors
///
/// [`EngineError::EmptySelection`] when the catalog is empty.
pub fn pick_one<'a, R>(catalog: &'a Catalog, rng: &mut R) -> Result<&'a Song, EngineError>
where
    R: Rng + ?Sized,
{
    let song = catalog
        .songs()
        .choose(rng)
        .ok_or(EngineError::EmptySelection)?;
    debug!("Mystery pick: `{song}'");
    Ok(song)
}

/// What to show when a mood matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NoMatchPolicy {
    /// Report that nothing matched.
    #[default]
    Warn,
    /// Silently draw from the full catalog instead.
    FallbackRandom,
}

/// Outcome of [`MoodEngine::recommend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation<'a> {
    /// Songs drawn from the mood's matches.
    Matches(Vec<&'a Song>),
    /// Nothing matched; songs drawn from the full catalog instead.
    Fallback(Vec<&'a Song>),
    /// Nothing matched and the policy is [`NoMatchPolicy::Warn`].
    NoMatches,
}

impl<'a> Recommendation<'a> {
    /// Songs to display, empty for [`Recommendation::NoMatches`].
    #[must_use]
    pub fn songs(&self) -> &[&'a Song] {
        match self {
            Recommendation::Matches(songs) | Recommendation::Fallback(songs) => songs,
            Recommendation::NoMatches => &[],
        }
    }
}

/// Filter + sample cycle over a shared, read-only catalog.
///
/// Holds no randomness of its own: every call takes the caller's (usually
/// per-session) generator.
#[derive(Debug, Clone)]
pub struct MoodEngine {
    catalog: Arc<Catalog>,
    sample_size: usize,
    policy: NoMatchPolicy,
}

impl MoodEngine {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            sample_size: DEFAULT_SAMPLE_SIZE,
            policy: NoMatchPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: NoMatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn policy(&self) -> NoMatchPolicy {
        self.policy
    }

    /// Whether the catalog's schema can express `mood` at all.
    #[must_use]
    pub fn supports(&self, mood: &Mood) -> bool {
        self.catalog.missing_fields(&mood.required_fields()).is_empty()
    }

    /// Filter by `mood`, then sample up to the configured number of songs.
    ///
    /// # Errors
    ///
    /// - [`EngineError::SchemaMismatch`] from [`filter`]
    /// - [`EngineError::EmptySelection`] when falling back on an empty catalog
    /// - [`EngineError::InvalidSampleSize`] when configured with zero
    pub fn recommend<R>(&self, mood: &Mood, rng: &mut R) -> Result<Recommendation<'_>, EngineError>
    where
        R: Rng + ?Sized,
    {
        let subset = filter(&self.catalog, mood)?;
        if !subset.is_empty() {
            return sample(&subset, self.sample_size, rng).map(Recommendation::Matches);
        }

        match self.policy {
            NoMatchPolicy::Warn => Ok(Recommendation::NoMatches),
            NoMatchPolicy::FallbackRandom => {
                debug!("No matches for `{}', falling back to the full catalog", mood.key());
                let everything: Vec<&Song> = self.catalog.songs().iter().collect();
                sample(&everything, self.sample_size, rng).map(Recommendation::Fallback)
            }
        }
    }

    /// See [`pick_one`].
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptySelection`] when the catalog is empty.
    pub fn pick_one<R>(&self, rng: &mut R) -> Result<&Song, EngineError>
    where
        R: Rng + ?Sized,
    {
        pick_one(&self.catalog, rng)
    }
}
