//! The event vocabulary consumed by [`App::update`](super::App::update).

use std::fmt;

use crossterm::event::{Event, KeyEvent};

use crate::health::NamedCheck;
use crate::nix::{FlakeOutputs, NixInfo};

use super::widgets::SpinnerTick;

/// Which background load a result or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Health,
    Info,
    Flake,
}

#[mutants::skip]
impl fmt::Display for LoadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Health => "health",
            Self::Info => "info",
            Self::Flake => "flake",
        })
    }
}

/// A failed background load. Non-fatal: shown in the footer until a later
/// load of the same kind succeeds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} load failed: {message}")]
pub struct LoadError {
    pub kind: LoadKind,
    pub message: String,
}

impl LoadError {
    pub fn new(kind: LoadKind, message: impl fmt::Display) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

/// Data produced by a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Health(Vec<NamedCheck>),
    Info(Box<NixInfo>),
    Flake(FlakeOutputs),
}

impl Payload {
    pub fn kind(&self) -> LoadKind {
        match self {
            Self::Health(_) => LoadKind::Health,
            Self::Info(_) => LoadKind::Info,
            Self::Flake(_) => LoadKind::Flake,
        }
    }
}

/// An immutable event, consumed exactly once by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key event from the terminal.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
    /// A background load finished.
    Loaded(Payload),
    /// A background load failed.
    LoadFailed(LoadError),
    /// Animation tick addressed to one spinner.
    SpinnerTick(SpinnerTick),
    /// Progress counter update.
    Progress(usize),
    /// Forces a widget into its done state.
    WidgetDone,
    /// Forces a widget into its error state.
    WidgetError(String),
}

impl Message {
    /// Maps a terminal event onto the message vocabulary; events the model
    /// has no use for (mouse, focus, paste) map to `None`.
    pub fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(Self::Key(key)),
            Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};

    use super::*;

    #[test]
    fn key_and_resize_events_map() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(Message::from_event(Event::Key(key)), Some(Message::Key(key)));
        assert_eq!(
            Message::from_event(Event::Resize(80, 24)),
            Some(Message::Resize {
                width: 80,
                height: 24
            })
        );
    }

    #[test]
    fn other_events_are_dropped() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(Message::from_event(Event::Mouse(mouse)), None);
        assert_eq!(Message::from_event(Event::FocusGained), None);
    }

    #[test]
    fn load_error_display_names_kind() {
        let err = LoadError::new(LoadKind::Info, "nix not found");
        assert_eq!(err.to_string(), "info load failed: nix not found");
    }

    #[test]
    fn payload_kind_matches_variant() {
        assert_eq!(Payload::Health(vec![]).kind(), LoadKind::Health);
        assert_eq!(
            Payload::Info(Box::new(NixInfo::default())).kind(),
            LoadKind::Info
        );
        assert_eq!(
            Payload::Flake(FlakeOutputs::default()).kind(),
            LoadKind::Flake
        );
    }
}
