//! Mood-based song picks from a tabular catalog.
//!
//! Core modules:
//! - [`engine`] - Mood filtering, random sampling, mystery pick
//! - [`mood`] - Mood predicates and the built-in mood set
//! - [`catalog`] / [`song`] - Typed rows and the declared schema
//! - [`session`] - Per-session random source and mystery box state
//!
//! ### Supporting Modules
//!
//! - [`loader`] - CSV catalog loading and column normalization
//! - [`config`] - Runtime configuration file
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`interactive`] - Line-driven session and text rendering
//! - [`error`] - Typed engine and loader errors
//!
//! ## Quick Start Example
//!
//! ```
//! use moodbox::catalog::Catalog;
//! use moodbox::engine::{self, MoodEngine, Recommendation};
//! use moodbox::mood::MoodKey;
//! use moodbox::session::{MysteryOutcome, Session};
//! use moodbox::song::{Field, Song};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::infer(vec![
//!     Song::new("Sunny Day", "A").with(Field::Popularity, 90.0),
//!     Song::new("Rainy Night", "B").with(Field::Popularity, 40.0),
//! ]));
//!
//! // Pure core
//! let subset = engine::filter(&catalog, MoodKey::Popular.mood())?;
//! assert_eq!(subset.len(), 1);
//!
//! // Caller-facing wrapper with per-session state
//! let engine = MoodEngine::new(Arc::clone(&catalog));
//! let mut session = Session::seeded(7);
//! match session.recommend(&engine, MoodKey::Popular.mood())? {
//!     Recommendation::Matches(songs) => assert_eq!(songs[0].to_string(), "Sunny Day by A"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! assert!(matches!(session.open_mystery(&engine)?, MysteryOutcome::Revealed(_)));
//! assert_eq!(session.open_mystery(&engine)?, MysteryOutcome::AlreadyOpened);
//! # Ok::<(), moodbox::error::EngineError>(())
//! ```
//!
//! ## Error Handling
//!
//! The engine distinguishes a mood the dataset cannot express
//! ([`error::EngineError::SchemaMismatch`]) from a mood that simply matched
//! nothing (an empty subset). Sampling from nothing is
//! [`error::EngineError::EmptySelection`].
//!
//! ## Logging
//!
//! Uses the `log` facade; the binary installs `env_logger`, so
//! `RUST_LOG=moodbox=debug moodbox recommend chill` shows filter and sample
//! sizes.

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod interactive;
pub mod loader;
pub mod mood;
pub mod session;
pub mod song;
