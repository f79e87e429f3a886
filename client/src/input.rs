//! Input model and the event-to-command translation.
//!
//! Hosts report raw events ([`InputEvent`]); [`InputController::translate`]
//! turns each into one [`Command`] given the current selection, plus whether
//! the event should keep propagating to the map. Translation is pure: the
//! app applies the command.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use wire::{Category, LatLng};

use crate::points::PointId;
use crate::render::{ShapeClick, ShapeClickHandler};
use crate::selection::Selection;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// A key press, classified from the host's key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Any single-character key, case as reported.
    Char(char),
    /// Named non-character keys (`"Shift"`, `"ArrowLeft"`, ...).
    Other(String),
}

impl Key {
    /// Classify a key name as reported by the host (browser `KeyboardEvent.key` style).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name == "Escape" || name == "Esc" {
            return Self::Escape;
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::Char(c),
            _ => Self::Other(name.to_owned()),
        }
    }
}

/// Raw user input reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Click on empty map (no marker under the pointer).
    MapClick { position: LatLng },
    /// Click on the marker of point `id`.
    MarkerClick { id: PointId },
    /// Click on a diagram cell at `position`, routed through the handler the
    /// renderer attached to that cell.
    ShapeClick { handler: ShapeClickHandler, modifiers: Modifiers, position: LatLng },
    KeyDown { key: Key },
}

/// What the app should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    AddPoint(LatLng),
    RemovePoint(PointId),
    Select(usize),
    Deselect,
    SetCategory(Category),
    Ignore,
}

/// Whether the host should let the event reach handlers underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    pub command: Command,
    pub propagation: Propagation,
}

impl Translation {
    fn continuing(command: Command) -> Self {
        Self { command, propagation: Propagation::Continue }
    }

    fn stopping(command: Command) -> Self {
        Self { command, propagation: Propagation::Stop }
    }
}

/// Stateless translator from [`InputEvent`] to [`Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InputController;

impl InputController {
    #[must_use]
    pub fn translate(self, event: &InputEvent, selection: Selection) -> Translation {
        match event {
            InputEvent::MapClick { position } => Translation::continuing(map_click(*position, selection)),
            InputEvent::MarkerClick { id } => Translation::stopping(Command::RemovePoint(*id)),
            InputEvent::ShapeClick { handler, modifiers, position } => match handler.handle(*modifiers) {
                ShapeClick::Select(index) => Translation::stopping(Command::Select(index)),
                // Falls through to the map as an ordinary click at the same spot.
                ShapeClick::PassThrough => Translation::continuing(map_click(*position, selection)),
            },
            InputEvent::KeyDown { key } => Translation::continuing(key_down(key, selection)),
        }
    }
}

/// A map click dismisses an active selection instead of adding a point.
fn map_click(position: LatLng, selection: Selection) -> Command {
    if selection.is_selected() { Command::Deselect } else { Command::AddPoint(position) }
}

fn key_down(key: &Key, selection: Selection) -> Command {
    if !selection.is_selected() {
        return Command::Ignore;
    }
    match key {
        Key::Escape => Command::Deselect,
        Key::Char(c) => Category::from_char(*c).map_or(Command::Ignore, Command::SetCategory),
        Key::Other(_) => Command::Ignore,
    }
}
