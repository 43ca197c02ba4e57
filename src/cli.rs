//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `moodbox` binary.
//!
//! ## Commands
//!
//! - `moods`: list built-in moods and whether the catalog supports them
//! - `recommend`: show a few songs for a mood
//! - `mystery`: reveal one random song
//! - `interactive`: line-driven session with a one-shot mystery box
//! - `completion`: generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! moodbox --catalog spotify.csv recommend popular
//! moodbox recommend "long songs" --count 3 --fallback
//! moodbox mystery
//! ```

use crate::engine::NoMatchPolicy;
use crate::mood::MoodKey;
use clap::builder::{PossibleValue, TypedValueParser};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "moodbox")]
#[command(about = "Moodbox: mood-based song picks and a mystery box from a CSV catalog")]
#[command(version)]
pub struct Args {
    /// CSV catalog to load (overrides the config file)
    #[arg(long, global = true, env = "MOODBOX_CATALOG", value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Config file to read instead of the platform default
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Seed the random source for reproducible picks
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the built-in moods
    ///
    /// Moods whose fields the catalog does not provide are marked as
    /// unavailable.
    Moods,

    /// Recommend songs for a mood
    ///
    /// Filters the catalog by the mood and shows a random handful of the
    /// matches.
    Recommend {
        /// Mood to pick, by key or display name (e.g. `long` or "Long Songs")
        #[arg(value_parser = MoodKeyParser)]
        mood: MoodKey,

        /// Number of songs to show (overrides the config file)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Draw from the whole catalog when nothing matches
        #[arg(long)]
        fallback: bool,
    },

    /// Open the mystery box: one random song from the whole catalog
    Mystery,

    /// Start an interactive session
    ///
    /// Reads commands from stdin: `mood <name>`, `open`, `reset`, `moods`,
    /// `help`, `quit`. The mystery box opens once until reset.
    Interactive {
        /// What to do when a mood matches nothing
        #[arg(long, value_enum)]
        policy: Option<NoMatchPolicy>,
    },

    /// Generate shell completions
    ///
    /// Usage: moodbox completion bash > ~/.local/share/bash-completion/completions/moodbox
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Parses a mood the same way the interactive `mood <name>` command does,
/// while still advertising the keys for help and completions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodKeyParser;

impl TypedValueParser for MoodKeyParser {
    type Value = MoodKey;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        _arg: Option<&clap::Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let value = value
            .to_str()
            .ok_or_else(|| clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd))?;
        value.parse::<MoodKey>().map_err(|message| {
            let keys: Vec<&str> = MoodKey::ALL.iter().map(|key| key.as_str()).collect();
            clap::Error::raw(
                ErrorKind::InvalidValue,
                format!("{message} (possible moods: {})\n", keys.join(", ")),
            )
            .with_cmd(cmd)
        })
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        Some(Box::new(
            MoodKey::value_variants()
                .iter()
                .filter_map(ValueEnum::to_possible_value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend_with_alias() {
        let args =
            Args::try_parse_from(["moodbox", "recommend", "long-songs", "-n", "3", "--fallback"])
                .unwrap();

        match args.command {
            Command::Recommend { mood, count, fallback } => {
                assert_eq!(mood, MoodKey::Long);
                assert_eq!(count, Some(3));
                assert!(fallback);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["moodbox", "mystery", "--seed", "7", "--catalog", "songs.csv"])
                .unwrap();

        assert_eq!(args.seed, Some(7));
        assert_eq!(args.catalog, Some(PathBuf::from("songs.csv")));
        assert!(matches!(args.command, Command::Mystery));
    }

    #[test]
    fn test_unknown_mood_rejected() {
        let err = Args::try_parse_from(["moodbox", "recommend", "angry"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_mood_accepts_display_names_like_interactive_mode() {
        for (input, expected) in [
            ("Long Songs", MoodKey::Long),
            ("long songs", MoodKey::Long),
            ("Popular", MoodKey::Popular),
            ("short_songs", MoodKey::Short),
        ] {
            let args = Args::try_parse_from(["moodbox", "recommend", input]).unwrap();
            match args.command {
                Command::Recommend { mood, .. } => {
                    assert_eq!(mood, expected, "{input}");
                    assert_eq!(Ok(mood), input.parse::<MoodKey>());
                }
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[test]
    fn test_mood_help_lists_keys() {
        let mut cmd = Args::command();
        let help = cmd
            .find_subcommand_mut("recommend")
            .expect("recommend subcommand")
            .render_long_help()
            .to_string();

        assert!(help.contains("romantic"));
        assert!(help.contains("chill"));
    }
}
