//! # Interactive Session
//!
//! A line-driven front end over one [`Session`]: pick moods, open the
//! mystery box once, reset it. Also holds the text rendering shared with
//! the one-shot commands in `main.rs`.
//!
//! Engine errors are reported to the user and the loop keeps going; only
//! I/O failures end it early.

use crate::engine::{MoodEngine, Recommendation};
use crate::error::EngineError;
use crate::mood::MoodKey;
use crate::session::{MysteryOutcome, Session};
use anyhow::Result;
use log::{debug, info};
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  mood <name>   recommend songs for a mood (see `moods`)
  open          open the mystery box
  reset         close the mystery box again
  moods         list moods
  help          show this message
  quit          leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Mood(String),
    Open,
    Reset,
    Moods,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let input = match word.to_lowercase().as_str() {
        "mood" | "m" => Input::Mood(rest.trim().to_string()),
        "open" | "o" => Input::Open,
        "reset" | "r" => Input::Reset,
        "moods" | "list" => Input::Moods,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    };
    Some(input)
}

/// Run the session until `quit` or end of input.
///
/// # Errors
///
/// Only when reading `input` or writing `out` fails.
pub fn run<R: BufRead, W: Write>(
    engine: &MoodEngine,
    session: &mut Session,
    input: R,
    out: &mut W,
) -> Result<()> {
    let loaded = engine.catalog().len();
    info!("Interactive session started ({loaded} songs)");
    writeln!(out, "🎧 Moodbox: {loaded} songs loaded. Type `help` for commands.")?;

    for line in input.lines() {
        let Some(command) = parse_input(&line?) else {
            continue;
        };
        debug!("Interactive command: {command:?}");

        match command {
            Input::Mood(name) => match name.parse::<MoodKey>() {
                Ok(key) => match session.recommend(engine, key.mood()) {
                    Ok(recommendation) => write_recommendation(out, &recommendation)?,
                    Err(err) => write_engine_error(out, &err)?,
                },
                Err(message) => writeln!(out, "{message}. Type `moods` to see the options.")?,
            },
            Input::Open => match session.open_mystery(engine) {
                Ok(outcome) => write_mystery(out, &outcome)?,
                Err(err) => write_engine_error(out, &err)?,
            },
            Input::Reset => {
                session.reset_mystery();
                writeln!(out, "🎁 The mystery box is closed again.")?;
            }
            Input::Moods => write_moods(out, engine)?,
            Input::Help => writeln!(out, "{HELP}")?,
            Input::Quit => break,
            Input::Unknown(line) => {
                writeln!(out, "Unknown command `{line}'. Type `help` for commands.")?;
            }
        }
    }

    writeln!(out, "Bye!")?;
    Ok(())
}

/// List every built-in mood, marking the ones the catalog cannot express.
///
/// # Errors
///
/// When writing fails.
pub fn write_moods<W: Write + ?Sized>(out: &mut W, engine: &MoodEngine) -> Result<()> {
    for key in MoodKey::ALL {
        let mood = key.mood();
        let missing = engine.catalog().missing_fields(&mood.required_fields());
        if missing.is_empty() {
            writeln!(out, "{:<9} {:<12} {}", key.as_str(), mood.name(), mood.describe())?;
        } else {
            let fields: Vec<&str> = missing.iter().map(|field| field.column()).collect();
            writeln!(
                out,
                "{:<9} {:<12} unavailable, catalog has no {}",
                key.as_str(),
                mood.name(),
                fields.join(", ")
            )?;
        }
    }
    Ok(())
}

/// # Errors
///
/// When writing fails.
pub fn write_recommendation<W: Write + ?Sized>(
    out: &mut W,
    recommendation: &Recommendation<'_>,
) -> Result<()> {
    match recommendation {
        Recommendation::Matches(_) => writeln!(out, "✨ Your recommended songs:")?,
        Recommendation::Fallback(_) => {
            writeln!(out, "😕 No songs match this mood, here are some random picks instead:")?;
        }
        Recommendation::NoMatches => {
            writeln!(out, "😕 No songs match this mood in your dataset.")?;
            return Ok(());
        }
    }
    for song in recommendation.songs() {
        writeln!(out, "🎵 {song}")?;
    }
    Ok(())
}

/// # Errors
///
/// When writing fails.
pub fn write_mystery<W: Write + ?Sized>(out: &mut W, outcome: &MysteryOutcome<'_>) -> Result<()> {
    match outcome {
        MysteryOutcome::Revealed(song) => writeln!(out, "🎶 {song}")?,
        MysteryOutcome::AlreadyOpened => {
            writeln!(
                out,
                "🎁 You already opened the mystery box. Type `reset` to close it again."
            )?;
        }
    }
    Ok(())
}

fn write_engine_error<W: Write + ?Sized>(out: &mut W, err: &EngineError) -> Result<()> {
    match err {
        EngineError::EmptySelection => {
            writeln!(out, "😕 The catalog is empty, nothing to pick.")?;
        }
        other => writeln!(out, "⚠️  {other}")?,
    }
    Ok(())
}
