//! Help screen — scrollable keybinding reference.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{ScreenState, pressed, scroll_by};
use crate::tui::command::Command;
use crate::tui::message::Message;

static NAVIGATION_KEYS: &[(&str, &str)] = &[
    ("1", "dashboard"),
    ("2", "health checks"),
    ("3", "nix info"),
    ("4", "flake browser"),
    ("?", "toggle this help"),
];

static ACTION_KEYS: &[(&str, &str)] = &[
    ("r", "refresh the current screen"),
    ("↑/↓ or k/j", "scroll or select"),
    ("Home / End", "first / last flake output"),
    ("q / Ctrl+C", "quit"),
];

/// State for the help screen.
#[derive(Debug, Clone, Default)]
pub struct HelpState {
    width: u16,
    height: u16,
    scroll: u16,
}

impl HelpState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self) -> u16 {
        // Title and footer take a line each.
        let visible = self.height.saturating_sub(2);
        (help_content().len() as u16).saturating_sub(visible)
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<16}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content() -> Vec<Line<'static>> {
    let mut lines = build_section("Navigation", NAVIGATION_KEYS);
    lines.extend(build_section("Actions", ACTION_KEYS));
    lines
}

impl ScreenState for HelpState {
    fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn update(&mut self, msg: &Message) -> Command {
        let max = self.max_scroll();
        if let Some(scroll) = pressed(msg).and_then(|code| scroll_by(code, self.scroll, max)) {
            self.scroll = scroll;
        }
        Command::none()
    }

    #[mutants::skip]
    fn draw(&self, frame: &mut Frame, area: Rect) {
        let [title_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(Paragraph::new(title), title_area);

        let content_lines = help_content();
        let total = content_lines.len() as u16;
        let capped_scroll = self.scroll.min(total.saturating_sub(content_area.height));
        frame.render_widget(
            Paragraph::new(content_lines).scroll((capped_scroll, 0)),
            content_area,
        );

        let footer =
            Paragraph::new("↑/↓: scroll  ?: back").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, footer_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;
    use crate::tui::screens::test_support::{press, render};

    mod construction {
        use super::*;

        #[test]
        fn new_starts_at_top() {
            assert_eq!(HelpState::new().scroll(), 0);
            assert_eq!(HelpState::new().size(), (0, 0));
        }
    }

    mod update {
        use super::*;

        #[test]
        fn down_scrolls_until_content_ends() {
            let mut state = HelpState::new();
            state.set_size(40, 6);
            let total = help_content().len() as u16;
            for _ in 0..50 {
                state.update(&press(KeyCode::Down));
            }
            assert_eq!(state.scroll(), total - 4);
        }

        #[test]
        fn up_at_top_stays_at_zero() {
            let mut state = HelpState::new();
            state.set_size(40, 6);
            state.update(&press(KeyCode::Up));
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn tall_terminal_never_scrolls() {
            let mut state = HelpState::new();
            state.set_size(40, 40);
            state.update(&press(KeyCode::Char('j')));
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn growing_the_terminal_clamps_scroll() {
            let mut state = HelpState::new();
            state.set_size(40, 4);
            for _ in 0..50 {
                state.update(&press(KeyCode::Down));
            }
            state.set_size(40, 40);
            assert_eq!(state.scroll(), 0);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn lists_both_sections() {
            let mut state = HelpState::new();
            state.set_size(60, 20);
            let output = render(&state, 60, 20);
            assert!(output.contains("Keyboard Shortcuts"));
            assert!(output.contains("Navigation"));
            assert!(output.contains("flake browser"));
            assert!(output.contains("Actions"));
            assert!(output.contains("refresh the current screen"));
        }
    }
}
