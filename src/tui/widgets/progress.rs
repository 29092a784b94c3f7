//! Progress widget — a `current/total` counter rendered as a bar.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::spinner::WidgetStatus;
use crate::tui::command::Command;
use crate::tui::message::Message;

const BAR_WIDTH: usize = 20;

/// A bounded counter with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    message: String,
    current: usize,
    /// Always at least 1 so the fraction is defined.
    total: usize,
    /// The job was created with zero items.
    empty: bool,
    status: WidgetStatus,
}

impl Progress {
    pub fn new(message: impl Into<String>, total: usize) -> Self {
        Self {
            message: message.into(),
            current: 0,
            total: total.max(1),
            empty: total == 0,
            status: WidgetStatus::Running,
        }
    }

    pub fn status(&self) -> &WidgetStatus {
        &self.status
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Completed fraction, clamped to `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        (self.current as f64 / self.total as f64).min(1.0)
    }

    /// Sets the counter and returns `true` once the widget is terminal.
    ///
    /// Empty jobs never complete through counter updates.
    pub fn advance(&mut self, current: usize) -> bool {
        if self.status.is_terminal() || self.empty {
            return self.status.is_terminal();
        }
        self.current = current;
        if self.current >= self.total {
            self.status = WidgetStatus::Done;
        }
        self.status.is_terminal()
    }

    /// Jumps straight to done; a failed widget stays failed.
    pub fn finish(&mut self) {
        if self.status == WidgetStatus::Running {
            self.current = self.total;
            self.status = WidgetStatus::Done;
        }
    }

    pub fn fail(&mut self, cause: impl Into<String>) {
        self.status = WidgetStatus::Failed(cause.into());
    }

    /// Applies a message; returns [`Command::Quit`] when the widget reaches a
    /// terminal state so a standalone driver knows to stop.
    pub fn update(&mut self, msg: &Message) -> Command {
        match msg {
            Message::Progress(current) => {
                if self.advance(*current) {
                    Command::quit()
                } else {
                    Command::none()
                }
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
            WidgetStatus::Done => {
                let total = if self.empty { 0 } else { self.total };
                Line::from(Span::styled(
                    format!("✓ {} ({total}/{total})", self.message),
                    Style::default().fg(Color::Green),
                ))
            }
            WidgetStatus::Running if self.empty => Line::from(Span::styled(
                format!("{} (no work to do)", self.message),
                Style::default().fg(Color::Yellow),
            )),
            WidgetStatus::Running => {
                let ratio = self.ratio();
                let filled = (ratio * BAR_WIDTH as f64).round() as usize;
                Line::from(vec![
                    Span::raw(format!("{} ", self.message)),
                    Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
                    Span::styled(
                        "░".repeat(BAR_WIDTH - filled),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!(
                        " {:>3}% {}/{}",
                        (ratio * 100.0).round() as u32,
                        self.current,
                        self.total
                    )),
                ])
            }
        }
    }
}
