//! Dashboard screen — landing page with an overview of the keys.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::ScreenState;
use crate::tui::command::Command;
use crate::tui::message::Message;

static OVERVIEW: &[(&str, &str)] = &[
    ("1", "Dashboard (this screen)"),
    ("2", "Health checks"),
    ("3", "System info"),
    ("4", "Flake browser"),
    ("r", "Refresh current screen"),
    ("?", "Toggle help"),
    ("q", "Quit"),
];

/// State for the dashboard screen.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    width: u16,
    height: u16,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScreenState for DashboardState {
    fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn update(&mut self, _msg: &Message) -> Command {
        Command::none()
    }

    #[mutants::skip]
    fn draw(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        let mut lines = vec![
            Line::from(Span::styled(
                "Welcome to Omnix TUI!",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("A developer-friendly companion for Nix."),
            Line::from(""),
        ];
        for (key, desc) in OVERVIEW {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<4}"), Style::default().fg(Color::Yellow)),
                Span::raw(*desc),
            ]));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
