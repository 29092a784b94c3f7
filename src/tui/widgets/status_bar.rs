//! Status bar widget — one-line footer with key hints or the last load error.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const KEY_HINTS: &str = "1-4: navigate • r: refresh • ?: help • q: quit";

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// The last load failure, if any; replaces the key hints.
    pub error: Option<String>,
}

/// Builds the status line: the error in red when present, otherwise the key hints.
pub fn status_line(ctx: &StatusBarContext) -> Line<'static> {
    match &ctx.error {
        Some(error) => Line::from(Span::styled(
            format!("Error: {error}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            KEY_HINTS,
            Style::default().fg(Color::DarkGray),
        )),
    }
}

/// Renders the status line into `area`.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new(status_line(ctx)), area);
}
