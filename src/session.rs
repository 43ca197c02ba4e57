//! Per-session state: the random source and the one-shot mystery box.
//!
//! Every user interaction runs against a `Session`. Sessions share the
//! catalog (read-only, behind an `Arc`) but never their generator or their
//! mystery flag.

use crate::engine::{MoodEngine, Recommendation};
use crate::error::EngineError;
use crate::mood::Mood;
use crate::song::Song;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Result of pressing the mystery box button.
#[derive(Debug, Clone, PartialEq)]
pub enum MysteryOutcome<'a> {
    /// First opening this session.
    Revealed(&'a Song),
    /// Already opened; reset before trying again.
    AlreadyOpened,
}

#[derive(Debug)]
pub struct Session {
    rng: StdRng,
    mystery_opened: bool,
}

impl Session {
    /// Session seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            mystery_opened: false,
        }
    }

    /// Deterministic session, for tests and reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        debug!("Starting session with seed {seed}");
        Self {
            rng: StdRng::seed_from_u64(seed),
            mystery_opened: false,
        }
    }

    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    #[must_use]
    pub fn mystery_opened(&self) -> bool {
        self.mystery_opened
    }

    /// Filter + sample for `mood` using this session's generator.
    ///
    /// # Errors
    ///
    /// See [`MoodEngine::recommend`].
    pub fn recommend<'e>(
        &mut self,
        engine: &'e MoodEngine,
        mood: &Mood,
    ) -> Result<Recommendation<'e>, EngineError> {
        engine.recommend(mood, &mut self.rng)
    }

    /// Reveal one random song, at most once until [`Session::reset_mystery`].
    ///
    /// The flag is only set when a song was actually revealed, so an empty
    /// catalog leaves the box closed.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptySelection`] when the catalog is empty.
    pub fn open_mystery<'e>(
        &mut self,
        engine: &'e MoodEngine,
    ) -> Result<MysteryOutcome<'e>, EngineError> {
        if self.mystery_opened {
            debug!("Mystery box already opened this session");
            return Ok(MysteryOutcome::AlreadyOpened);
        }

        let song = engine.pick_one(&mut self.rng)?;
        self.mystery_opened = true;
        info!("Mystery box revealed `{song}'");
        Ok(MysteryOutcome::Revealed(song))
    }

    pub fn reset_mystery(&mut self) {
        debug!("Mystery box reset");
        self.mystery_opened = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::mood::MoodKey;
    use std::sync::Arc;

    fn engine() -> MoodEngine {
        MoodEngine::new(Arc::new(Catalog::infer(vec![
            Song::new("Sunny Day", "A"),
            Song::new("Rainy Night", "B"),
            Song::new("Love Story", "C"),
        ])))
    }

    #[test]
    fn test_mystery_opens_once_until_reset() {
        let engine = engine();
        let mut session = Session::seeded(1);

        assert!(!session.mystery_opened());
        let first = session.open_mystery(&engine).unwrap();
        let songs = engine.catalog().songs();
        assert!(matches!(first, MysteryOutcome::Revealed(song) if songs.contains(song)));
        assert!(session.mystery_opened());

        assert_eq!(session.open_mystery(&engine).unwrap(), MysteryOutcome::AlreadyOpened);

        session.reset_mystery();
        assert!(!session.mystery_opened());
        assert!(matches!(session.open_mystery(&engine).unwrap(), MysteryOutcome::Revealed(_)));
    }

    #[test]
    fn test_sessions_do_not_share_the_flag() {
        let engine = engine();
        let mut alice = Session::seeded(1);
        let mut bob = Session::seeded(1);

        alice.open_mystery(&engine).unwrap();
        assert!(alice.mystery_opened());
        assert!(!bob.mystery_opened());
        assert!(matches!(bob.open_mystery(&engine).unwrap(), MysteryOutcome::Revealed(_)));
    }

    #[test]
    fn test_empty_catalog_keeps_box_closed() {
        let engine = MoodEngine::new(Arc::new(Catalog::default()));
        let mut session = Session::seeded(3);

        assert_eq!(session.open_mystery(&engine), Err(EngineError::EmptySelection));
        assert!(!session.mystery_opened());
    }

    #[test]
    fn test_same_seed_same_recommendation() {
        let engine = engine().with_sample_size(2);
        let mut first = Session::seeded(99);
        let mut second = Session::seeded(99);

        let a = first.recommend(&engine, MoodKey::Random.mood()).unwrap();
        let b = second.recommend(&engine, MoodKey::Random.mood()).unwrap();
        assert_eq!(a, b);
    }
}
