use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tracing::{debug, info};

use crate::config::Config;
use crate::nix::SystemProbe;

use super::command::Command;
use super::load;
use super::message::{LoadError, LoadKind, Message, Payload};
use super::screens::{
    DashboardState, FlakeState, HealthState, HelpState, InfoState, ScreenState,
};
use super::widgets::{StatusBarContext, draw_status_bar};

/// Rows taken by the header (title, tabs, rule) and the status bar.
pub const CHROME_HEIGHT: u16 = 4;

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Landing page.
    Dashboard,
    /// Nix health check results.
    Health,
    /// Nix version, configuration and host environment.
    Info,
    /// Outputs of the configured flake.
    FlakeBrowser,
    /// Keybinding reference.
    Help,
}

impl Screen {
    /// Tab order in the header.
    pub const ALL: [Screen; 5] = [
        Self::Dashboard,
        Self::Health,
        Self::Info,
        Self::FlakeBrowser,
        Self::Help,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Health => "Health",
            Self::Info => "Info",
            Self::FlakeBrowser => "Flake",
            Self::Help => "Help",
        }
    }

    /// The key that selects this screen.
    pub fn key(self) -> char {
        match self {
            Self::Dashboard => '1',
            Self::Health => '2',
            Self::Info => '3',
            Self::FlakeBrowser => '4',
            Self::Help => '?',
        }
    }

    fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Dashboard),
            '2' => Some(Self::Health),
            '3' => Some(Self::Info),
            '4' => Some(Self::FlakeBrowser),
            _ => None,
        }
    }
}

/// Top-level application state.
///
/// All mutation happens inside [`update`](Self::update); background loads only
/// ever report back through the [`Message`]s their commands resolve to.
pub struct App {
    screen: Screen,
    width: u16,
    height: u16,
    error: Option<LoadError>,
    quitting: bool,
    probe: Arc<dyn SystemProbe>,
    dashboard: DashboardState,
    health: HealthState,
    info: InfoState,
    flake: FlakeState,
    help: HelpState,
}

impl App {
    /// Creates an app on the [`Screen::Dashboard`] screen with a 0×0 viewport.
    pub fn new(probe: Arc<dyn SystemProbe>, config: &Config) -> Self {
        let tick = config.tick_interval();
        Self {
            screen: Screen::Dashboard,
            width: 0,
            height: 0,
            error: None,
            quitting: false,
            probe,
            dashboard: DashboardState::new(),
            health: HealthState::new(tick),
            info: InfoState::new(tick),
            flake: FlakeState::new(config.flake.clone()),
            help: HelpState::new(),
        }
    }

    /// Starts the first health and info loads so those screens are warm
    /// before the user opens them.
    pub fn init(&self) -> Command {
        Command::batch([
            load::health(self.probe.clone()),
            load::info(self.probe.clone()),
        ])
    }

    /// Applies one message and returns the follow-up work.
    pub fn update(&mut self, msg: Message) -> Command {
        if self.quitting {
            return Command::none();
        }
        match msg {
            Message::Key(key) if key.kind == KeyEventKind::Press => match self.handle_key(key) {
                Some(cmd) => cmd,
                None => self.forward(&msg),
            },
            Message::Resize { width, height } => {
                self.resize(width, height);
                Command::none()
            }
            Message::Loaded(payload) => {
                self.apply(payload);
                Command::none()
            }
            Message::LoadFailed(err) => {
                if err.kind == LoadKind::Flake {
                    self.flake.load_failed();
                }
                self.error = Some(err);
                Command::none()
            }
            other => self.forward(&other),
        }
    }

    /// Global keys. `None` means the key belongs to the active screen.
    fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        let cmd = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') => self.quit(),
            // The screen behind help is not remembered.
            KeyCode::Char('?') if self.screen == Screen::Help => self.navigate(Screen::Dashboard),
            KeyCode::Char('?') => {
                self.screen = Screen::Help;
                Command::none()
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char(c) => self.navigate(Screen::from_digit(c)?),
            _ => return None,
        };
        Some(cmd)
    }

    fn quit(&mut self) -> Command {
        info!("quitting");
        self.quitting = true;
        Command::quit()
    }

    fn navigate(&mut self, screen: Screen) -> Command {
        debug!(from = ?self.screen, to = ?screen, "navigate");
        self.screen = screen;
        match screen {
            Screen::Health => {
                Command::batch([self.health.activate(), load::health(self.probe.clone())])
            }
            Screen::Info => Command::batch([self.info.activate(), load::info(self.probe.clone())]),
            Screen::Dashboard | Screen::FlakeBrowser | Screen::Help => Command::none(),
        }
    }

    fn refresh(&mut self) -> Command {
        debug!(screen = ?self.screen, "refresh");
        match self.screen {
            Screen::Health => load::health(self.probe.clone()),
            Screen::Info => load::info(self.probe.clone()),
            Screen::FlakeBrowser => {
                self.flake.set_loading();
                load::flake(self.probe.clone())
            }
            Screen::Dashboard | Screen::Help => Command::none(),
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let content = height.saturating_sub(CHROME_HEIGHT);
        self.dashboard.set_size(width, content);
        self.health.set_size(width, content);
        self.info.set_size(width, content);
        self.flake.set_size(width, content);
        self.help.set_size(width, content);
    }

    /// Lands a payload on its screen whichever screen is active.
    fn apply(&mut self, payload: Payload) {
        let kind = payload.kind();
        debug!(%kind, "data ready");
        if self.error.as_ref().is_some_and(|e| e.kind == kind) {
            self.error = None;
        }
        match payload {
            Payload::Health(checks) => self.health.set_data(checks),
            Payload::Info(info) => self.info.set_data(*info),
            Payload::Flake(outputs) => self.flake.set_data(outputs),
        }
    }

    fn forward(&mut self, msg: &Message) -> Command {
        match self.screen {
            Screen::Dashboard => self.dashboard.update(msg),
            Screen::Health => self.health.update(msg),
            Screen::Info => self.info.update(msg),
            Screen::FlakeBrowser => self.flake.update(msg),
            Screen::Help => self.help.update(msg),
        }
    }

    /// Renders header, active screen and status bar. Draws nothing once quitting.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn draw(&self, frame: &mut Frame) {
        if self.quitting {
            return;
        }
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(CHROME_HEIGHT - 1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.draw_header(frame, header);
        match self.screen {
            Screen::Dashboard => self.dashboard.draw(frame, content),
            Screen::Health => self.health.draw(frame, content),
            Screen::Info => self.info.draw(frame, content),
            Screen::FlakeBrowser => self.flake.draw(frame, content),
            Screen::Help => self.help.draw(frame, content),
        }
        let ctx = StatusBarContext {
            error: self.error.as_ref().map(ToString::to_string),
        };
        draw_status_bar(&ctx, frame, footer);
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(
                " Omnix TUI ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tabs: Vec<Span> = Screen::ALL
            .iter()
            .map(|&screen| {
                let style = if screen == self.screen {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled(format!(" {} {} ", screen.key(), screen.label()), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(tabs)), inner);
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Viewport `(width, height)` from the last resize.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn health(&self) -> &HealthState {
        &self.health
    }

    pub fn info(&self) -> &InfoState {
        &self.info
    }

    pub fn flake(&self) -> &FlakeState {
        &self.flake
    }

    pub fn help(&self) -> &HelpState {
        &self.help
    }
}
