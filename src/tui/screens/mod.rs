//! Screen state holders. Each owns its slot of state and is driven by the
//! [`App`](super::App) through [`ScreenState`].

pub mod dashboard;
pub mod flake;
pub mod health;
pub mod help;
pub mod info;

use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;

use super::command::Command;
use super::message::Message;

pub use dashboard::DashboardState;
pub use flake::FlakeState;
pub use health::HealthState;
pub use help::HelpState;
pub use info::InfoState;

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Stores the content area size assigned by the app.
    fn set_size(&mut self, width: u16, height: u16);

    /// Returns the stored `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Handles a message the app did not consume itself.
    fn update(&mut self, msg: &Message) -> Command;

    /// Renders the screen into `area`.
    fn draw(&self, frame: &mut Frame, area: Rect);
}

/// The key code of a key press, if `msg` is one.
fn pressed(msg: &Message) -> Option<KeyCode> {
    match msg {
        Message::Key(key) if key.kind == KeyEventKind::Press => Some(key.code),
        _ => None,
    }
}

/// Scroll offset after an up/down key, bounded by `max`.
fn scroll_by(code: KeyCode, scroll: u16, max: u16) -> Option<u16> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(scroll.saturating_sub(1)),
        KeyCode::Down | KeyCode::Char('j') => Some(scroll.saturating_add(1).min(max)),
        _ => None,
    }
}
