//! Health screen — diagnostic results with a pass summary.

use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{ScreenState, pressed, scroll_by};
use crate::health::{NamedCheck, Verdict};
use crate::tui::command::Command;
use crate::tui::message::Message;
use crate::tui::widgets::{Progress, Spinner, render_check_list};

/// State for the health screen.
#[derive(Debug, Clone)]
pub struct HealthState {
    width: u16,
    height: u16,
    checks: Vec<NamedCheck>,
    loading: bool,
    spinner: Spinner,
    summary: Progress,
    updated_at: Option<DateTime<Local>>,
    scroll: u16,
}

impl HealthState {
    /// Creates a state that is loading, with a spinner ticking every `tick`.
    pub fn new(tick: Duration) -> Self {
        Self {
            width: 0,
            height: 0,
            checks: Vec::new(),
            loading: true,
            spinner: Spinner::new("Running health checks…", tick),
            summary: Progress::new("Checks passing", 0),
            updated_at: None,
            scroll: 0,
        }
    }

    /// Kicks the loading spinner when the screen becomes active.
    pub fn activate(&self) -> Command {
        if self.loading {
            self.spinner.tick()
        } else {
            Command::none()
        }
    }

    /// Replaces the results and clears the loading flag.
    pub fn set_data(&mut self, checks: Vec<NamedCheck>) {
        let passed = checks.iter().filter(|c| c.check.result.is_green()).count();
        self.summary = Progress::new("Checks passing", checks.len());
        self.summary.advance(passed);
        self.checks = checks;
        self.loading = false;
        self.spinner.finish();
        self.updated_at = Some(Local::now());
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn checks(&self) -> &[NamedCheck] {
        &self.checks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    pub fn summary(&self) -> &Progress {
        &self.summary
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self) -> u16 {
        let lines = render_check_list(&self.checks, self.width).lines.len() as u16;
        lines.saturating_sub(self.height.saturating_sub(HEADER_LINES))
    }
}

const HEADER_LINES: u16 = 4;

impl ScreenState for HealthState {
    fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn update(&mut self, msg: &Message) -> Command {
        if let Message::SpinnerTick(_) = msg {
            return self.spinner.update(msg);
        }
        let max = self.max_scroll();
        if let Some(scroll) = pressed(msg).and_then(|code| scroll_by(code, self.scroll, max)) {
            self.scroll = scroll;
        }
        Command::none()
    }

    #[mutants::skip]
    fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.loading && self.checks.is_empty() {
            frame.render_widget(Paragraph::new(self.spinner.view()), area);
            return;
        }

        let [title_area, summary_area, verdict_area, _, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let mut title = vec![Span::styled(
            "Nix Health Checks",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(at) = self.updated_at {
            title.push(Span::styled(
                format!("  updated {}", at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(title)), title_area);
        frame.render_widget(Paragraph::new(self.summary.view()), summary_area);

        let verdict = Verdict::evaluate(&self.checks);
        let color = match verdict {
            Verdict::Pass => Color::Green,
            Verdict::PassSomeFail => Color::Yellow,
            Verdict::Fail => Color::Red,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(verdict.summary(), Style::default().fg(color))),
            verdict_area,
        );

        let list = Paragraph::new(render_check_list(&self.checks, list_area.width))
            .scroll((self.scroll, 0));
        frame.render_widget(list, list_area);
    }
}
