//! Info screen — Nix version, configuration and host environment.

use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{ScreenState, pressed, scroll_by};
use crate::nix::NixInfo;
use crate::tui::command::Command;
use crate::tui::message::Message;
use crate::tui::widgets::Spinner;

/// State for the info screen.
#[derive(Debug, Clone)]
pub struct InfoState {
    width: u16,
    height: u16,
    info: Option<NixInfo>,
    loading: bool,
    spinner: Spinner,
    updated_at: Option<DateTime<Local>>,
    scroll: u16,
}

impl InfoState {
    pub fn new(tick: Duration) -> Self {
        Self {
            width: 0,
            height: 0,
            info: None,
            loading: true,
            spinner: Spinner::new("Loading system information…", tick),
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

    pub fn set_data(&mut self, info: NixInfo) {
        self.info = Some(info);
        self.loading = false;
        self.spinner.finish();
        self.updated_at = Some(Local::now());
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn info(&self) -> Option<&NixInfo> {
        self.info.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self) -> u16 {
        (self.lines().len() as u16).saturating_sub(self.height)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let Some(info) = &self.info else {
            return Vec::new();
        };
        let mut title = vec![Span::styled(
            "Nix System Information",
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

        let config = &info.config;
        let env = &info.env;
        let mut lines = vec![Line::from(title)];

        section(&mut lines, "Nix Version");
        row(&mut lines, "Version", info.version.to_string());

        section(&mut lines, "Nix Configuration");
        row(&mut lines, "System", config.system.clone());
        row(&mut lines, "Substituters", config.substituters.join(", "));
        row(&mut lines, "Trusted users", config.trusted_users.join(", "));
        if config.max_jobs > 0 {
            row(&mut lines, "Max jobs", config.max_jobs.to_string());
        }
        if config.cores > 0 {
            row(&mut lines, "Cores", config.cores.to_string());
        }
        row(&mut lines, "Experimental", config.experimental_features.join(", "));

        section(&mut lines, "Environment");
        row(&mut lines, "User", env.user.clone());
        row(&mut lines, "OS", env.os.to_string());
        row(&mut lines, "Arch", env.arch.clone());
        row(&mut lines, "Groups", env.groups.join(", "));
        if let Some(shell) = &env.shell {
            row(&mut lines, "Shell", shell.clone());
        }
        lines
    }
}

fn section(lines: &mut Vec<Line<'static>>, title: &'static str) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )));
}

/// Appends `key: value`; empty values are skipped.
fn row(lines: &mut Vec<Line<'static>>, key: &str, value: String) {
    if value.is_empty() {
        return;
    }
    lines.push(Line::from(vec![
        Span::styled(format!("  {key:<16}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ]));
}

impl ScreenState for InfoState {
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
        if self.loading && self.info.is_none() {
            frame.render_widget(Paragraph::new(self.spinner.view()), area);
            return;
        }
        frame.render_widget(Paragraph::new(self.lines()).scroll((self.scroll, 0)), area);
    }
}
