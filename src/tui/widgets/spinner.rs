//! Spinner widget — animated one-line status for work in flight.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::command::Command;
use crate::tui::message::Message;

const FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Addresses a tick to one spinner and one generation of its tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpinnerTick {
    id: usize,
    tag: usize,
}

/// Lifecycle shared by the spinner and progress widgets.
///
/// `Done` and `Failed` are terminal. `Failed` also wins over `Done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetStatus {
    Running,
    Done,
    Failed(String),
}

impl WidgetStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// An animated spinner with a message.
#[derive(Debug, Clone)]
pub struct Spinner {
    id: usize,
    tag: usize,
    frame: usize,
    interval: Duration,
    message: String,
    status: WidgetStatus,
}

impl Spinner {
    pub fn new(message: impl Into<String>, interval: Duration) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            tag: 0,
            frame: 0,
            interval,
            message: message.into(),
            status: WidgetStatus::Running,
        }
    }

    pub fn status(&self) -> &WidgetStatus {
        &self.status
    }

    /// Index of the current animation frame.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Schedules the next tick for the current generation. Nothing is
    /// scheduled once the spinner is terminal.
    pub fn tick(&self) -> Command {
        if self.status.is_terminal() {
            return Command::none();
        }
        let tick = SpinnerTick {
            id: self.id,
            tag: self.tag,
        };
        let interval = self.interval;
        Command::perform(async move {
            tokio::time::sleep(interval).await;
            Some(Message::SpinnerTick(tick))
        })
    }

    /// Marks the spinner done; a failed spinner stays failed.
    pub fn finish(&mut self) {
        if self.status == WidgetStatus::Running {
            self.status = WidgetStatus::Done;
        }
    }

    pub fn fail(&mut self, cause: impl Into<String>) {
        self.status = WidgetStatus::Failed(cause.into());
    }

    /// Applies a message. Ticks for another spinner or a stale generation are
    /// dropped, which keeps at most one tick loop alive per spinner.
    ///
    /// `WidgetDone` and `WidgetError` return [`Command::Quit`] for a standalone
    /// driver. Screens embedding a spinner only route `SpinnerTick` here and
    /// use [`finish`](Self::finish) / [`fail`](Self::fail) for the rest.
    pub fn update(&mut self, msg: &Message) -> Command {
        match msg {
            Message::SpinnerTick(tick) => {
                if tick.id != self.id || tick.tag != self.tag || self.status.is_terminal() {
                    return Command::none();
                }
                self.frame = (self.frame + 1) % FRAMES.len();
                self.tag = self.tag.wrapping_add(1);
                self.tick()
            }
            Message::WidgetDone => {
                self.finish();
                Command::quit()
            }
            Message::WidgetError(cause) => {
                self.fail(cause.clone());
                Command::quit()
            }
            _ => Command::none(),
        }
    }

    pub fn view(&self) -> Line<'static> {
        match &self.status {
            WidgetStatus::Failed(cause) => Line::from(Span::styled(
                format!("✗ {}: {cause}", self.message),
                Style::default().fg(Color::Red),
            )),
            WidgetStatus::Done => Line::from(Span::styled(
                format!("✓ {}", self.message),
                Style::default().fg(Color::Green),
            )),
            WidgetStatus::Running => Line::from(vec![
                Span::styled(FRAMES[self.frame], Style::default().fg(Color::Magenta)),
                Span::raw(format!(" {}", self.message)),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spinner() -> Spinner {
        Spinner::new("Loading", Duration::from_millis(1))
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    async fn next_tick(cmd: Command) -> Message {
        let (effects, _) = cmd.into_parts();
        let mut messages = Vec::new();
        for effect in effects {
            messages.extend(effect.await);
        }
        assert_eq!(messages.len(), 1, "expected exactly one tick");
        messages.remove(0)
    }

    #[test]
    fn starts_running_on_first_frame() {
        let s = spinner();
        assert_eq!(s.status(), &WidgetStatus::Running);
        assert_eq!(s.frame(), 0);
        assert_eq!(s.tick().effect_count(), 1);
    }

    #[tokio::test]
    async fn tick_advances_frame_and_rearms() {
        let mut s = spinner();
        let tick = next_tick(s.tick()).await;
        let next = s.update(&tick);
        assert_eq!(s.frame(), 1);
        assert_eq!(next.effect_count(), 1);
    }

    #[tokio::test]
    async fn stale_tick_is_ignored() {
        let mut s = spinner();
        let first = next_tick(s.tick()).await;
        let duplicate = first.clone();
        s.update(&first);
        let cmd = s.update(&duplicate);
        assert!(cmd.is_none());
        assert_eq!(s.frame(), 1);
    }

    #[tokio::test]
    async fn tick_for_other_spinner_is_ignored() {
        let mut a = spinner();
        let b = spinner();
        let tick = next_tick(b.tick()).await;
        assert!(a.update(&tick).is_none());
        assert_eq!(a.frame(), 0);
    }

    #[tokio::test]
    async fn ticks_after_done_are_ignored() {
        let mut s = spinner();
        let tick = next_tick(s.tick()).await;
        assert!(s.update(&Message::WidgetDone).is_quit());
        assert!(s.update(&tick).is_none());
        assert_eq!(s.frame(), 0);
        assert_eq!(s.status(), &WidgetStatus::Done);
        assert!(s.tick().is_none());
    }

    #[tokio::test]
    async fn ticks_after_error_are_ignored() {
        let mut s = spinner();
        let tick = next_tick(s.tick()).await;
        assert!(s.update(&Message::WidgetError("boom".into())).is_quit());
        assert!(s.update(&tick).is_none());
        assert_eq!(s.frame(), 0);
    }

    #[test]
    fn done_does_not_clear_error() {
        let mut s = spinner();
        s.fail("boom");
        s.finish();
        assert_eq!(s.status(), &WidgetStatus::Failed("boom".into()));
    }

    #[test]
    fn unrelated_messages_do_nothing() {
        let mut s = spinner();
        assert!(s.update(&Message::Progress(3)).is_none());
        assert_eq!(s.status(), &WidgetStatus::Running);
    }

    #[test]
    fn view_reflects_status() {
        let mut s = spinner();
        assert_eq!(line_text(&s.view()), "⣾ Loading");
        s.finish();
        assert_eq!(line_text(&s.view()), "✓ Loading");
        s.fail("nix missing");
        assert_eq!(line_text(&s.view()), "✗ Loading: nix missing");
    }
}
