//! Interactive session: stdin commands mapped onto client input events.
//!
//! Each line is one command:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `click LAT LNG` | Click empty map at a position |
//! | `marker N` | Click the N-th marker (removes its point) |
//! | `cell N [--plain]` | Shift-click the cell of point N; `--plain` drops shift |
//! | `key K` | Press a key (`Escape`, a letter, ...) |
//! | `show` | Print the map and panel |
//! | `quit` | End the session |

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::io::BufRead;

use client::app::{AnnotationApp, Effect, SyncReport};
use client::input::{InputEvent, Key, Modifiers};
use client::sync::Backend;
use tracing::warn;
use wire::LatLng;

use crate::surface::{TextPanel, TextSurface};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try click, marker, cell, key, show, quit)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid number '{0}'")]
    Number(String),
    #[error("no marker {0}")]
    NoMarker(usize),
    #[error("no cell for point {0}")]
    NoCell(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Click(LatLng),
    Marker(usize),
    Cell { index: usize, shift: bool },
    Key(String),
    Show,
    Quit,
    Blank,
}

impl SessionCommand {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for unknown commands or malformed arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Blank);
        };
        let args: Vec<&str> = words.collect();
        match (head, args.as_slice()) {
            ("click", [lat, lng]) => Ok(Self::Click(LatLng::new(number(lat)?, number(lng)?))),
            ("click", _) => Err(CommandError::Usage("click LAT LNG")),
            ("marker", [n]) => Ok(Self::Marker(index(n)?)),
            ("marker", _) => Err(CommandError::Usage("marker N")),
            ("cell", [n]) => Ok(Self::Cell { index: index(n)?, shift: true }),
            ("cell", [n, "--plain"]) => Ok(Self::Cell { index: index(n)?, shift: false }),
            ("cell", _) => Err(CommandError::Usage("cell N [--plain]")),
            ("key", [k]) => Ok(Self::Key((*k).to_owned())),
            ("key", _) => Err(CommandError::Usage("key K")),
            ("show", []) => Ok(Self::Show),
            ("quit" | "exit", []) => Ok(Self::Quit),
            (other, _) => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

fn number(raw: &str) -> Result<f64, CommandError> {
    raw.parse().map_err(|_| CommandError::Number(raw.to_owned()))
}

fn index(raw: &str) -> Result<usize, CommandError> {
    raw.parse().map_err(|_| CommandError::Number(raw.to_owned()))
}

pub type TextApp<B> = AnnotationApp<TextSurface, TextPanel, B>;

/// Translate a map-level command into an input event for the app.
///
/// # Errors
///
/// Returns [`CommandError`] when the named marker or cell is not on the map.
pub fn to_event<B: Backend>(app: &TextApp<B>, command: &SessionCommand) -> Result<Option<InputEvent>, CommandError> {
    let event = match command {
        SessionCommand::Click(position) => InputEvent::MapClick { position: *position },
        SessionCommand::Marker(n) => {
            let id = app.surface().marker_at(*n).ok_or(CommandError::NoMarker(*n))?;
            InputEvent::MarkerClick { id }
        }
        SessionCommand::Cell { index, shift } => {
            let handler = app.renderer().handler_for(*index).ok_or(CommandError::NoCell(*index))?;
            let position = app.state().points().get(*index).map(|p| p.position).ok_or(CommandError::NoCell(*index))?;
            let modifiers = if *shift { Modifiers::shift() } else { Modifiers::default() };
            InputEvent::ShapeClick { handler, modifiers, position }
        }
        SessionCommand::Key(name) => InputEvent::KeyDown { key: Key::from_name(name) },
        SessionCommand::Show | SessionCommand::Quit | SessionCommand::Blank => return Ok(None),
    };
    Ok(Some(event))
}

/// Describe a sync report for the terminal.
#[must_use]
pub fn describe(report: SyncReport) -> String {
    match report {
        SyncReport::Rendered { shapes } => format!("diagram: {shapes} cells"),
        SyncReport::NoDiagram => "diagram: none".to_owned(),
        SyncReport::PersistFailed => "save failed; diagram unchanged".to_owned(),
        SyncReport::FetchFailed => "diagram fetch failed; diagram cleared".to_owned(),
        SyncReport::Superseded => "stale result discarded".to_owned(),
    }
}

/// Drive `app` from `input` until `quit` or end of input.
///
/// # Errors
///
/// Returns the I/O error if reading `input` fails.
pub async fn run<B: Backend, R: BufRead>(app: &mut TextApp<B>, input: R) -> std::io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                warn!(line = %line, error = %e, "command rejected");
                continue;
            }
        };
        match command {
            SessionCommand::Quit => break,
            SessionCommand::Blank => continue,
            SessionCommand::Show => {
                print!("{}", app.surface().render());
                println!("{}", app.panel().status());
                continue;
            }
            _ => {}
        }
        match to_event(app, &command) {
            Ok(Some(event)) => {
                let dispatch = app.dispatch(&event);
                if dispatch.effect == Effect::PersistAndRefresh {
                    println!("{}", describe(app.persist_and_refresh().await));
                }
                println!("{}", app.panel().status());
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "command not applied"),
        }
    }
    Ok(())
}
