//! Flake browser screen — outputs of the configured flake, one per row.

use std::path::PathBuf;

use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{ScreenState, pressed};
use crate::nix::FlakeOutputs;
use crate::tui::command::Command;
use crate::tui::message::Message;

/// State for the flake browser screen.
#[derive(Debug, Clone)]
pub struct FlakeState {
    width: u16,
    height: u16,
    flake: PathBuf,
    outputs: Option<FlakeOutputs>,
    loading: bool,
    /// Index into the flattened list of leaf outputs.
    selected: usize,
}

enum Row<'a> {
    Group(&'a str, usize),
    Leaf(&'a str),
}

impl FlakeState {
    pub fn new(flake: impl Into<PathBuf>) -> Self {
        Self {
            width: 0,
            height: 0,
            flake: flake.into(),
            outputs: None,
            loading: false,
            selected: 0,
        }
    }

    pub fn set_data(&mut self, outputs: FlakeOutputs) {
        self.selected = self.selected.min(outputs.len().saturating_sub(1));
        self.outputs = Some(outputs);
        self.loading = false;
    }

    /// Marks a load as outstanding; cleared by the next [`set_data`](Self::set_data)
    /// or [`load_failed`](Self::load_failed).
    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    pub fn outputs(&self) -> Option<&FlakeOutputs> {
        self.outputs.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Full attribute path of the selected output, e.g. `packages.x86_64-linux.default`.
    pub fn selected_attr(&self) -> Option<String> {
        self.outputs
            .as_ref()?
            .groups
            .iter()
            .flat_map(|g| g.attrs.iter().map(move |a| format!("{}.{a}", g.name)))
            .nth(self.selected)
    }

    fn rows(&self) -> Vec<Row<'_>> {
        let Some(outputs) = &self.outputs else {
            return Vec::new();
        };
        let mut rows = Vec::new();
        for group in &outputs.groups {
            rows.push(Row::Group(&group.name, group.attrs.len()));
            rows.extend(group.attrs.iter().map(|a| Row::Leaf(a)));
        }
        rows
    }
}

impl ScreenState for FlakeState {
    fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn update(&mut self, msg: &Message) -> Command {
        let count = self.outputs.as_ref().map_or(0, FlakeOutputs::len);
        match pressed(msg) {
            Some(KeyCode::Up | KeyCode::Char('k')) => {
                self.selected = self.selected.saturating_sub(1);
            }
            Some(KeyCode::Down | KeyCode::Char('j')) if count > 0 => {
                self.selected = (self.selected + 1).min(count - 1);
            }
            Some(KeyCode::Home) => self.selected = 0,
            Some(KeyCode::End) => self.selected = count.saturating_sub(1),
            _ => {}
        }
        Command::none()
    }

    #[mutants::skip]
    fn draw(&self, frame: &mut Frame, area: Rect) {
        let [title_area, list_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = Line::from(vec![
            Span::styled(
                "Flake Browser",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", self.flake.display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), title_area);

        match &self.outputs {
            None if self.loading => {
                frame.render_widget(Paragraph::new("Loading flake outputs…"), list_area);
            }
            None => {
                let hint = "Press r to load the outputs of this flake.";
                frame.render_widget(Paragraph::new(hint), list_area);
            }
            Some(outputs) if outputs.groups.is_empty() => {
                frame.render_widget(Paragraph::new("This flake has no outputs."), list_area);
            }
            Some(_) => {
                let mut leaf = 0;
                let mut selected_row = 0;
                let lines: Vec<Line> = self
                    .rows()
                    .into_iter()
                    .enumerate()
                    .map(|(i, row)| match row {
                        Row::Group(name, count) => Line::from(Span::styled(
                            format!("{name} ({count})"),
                            Style::default()
                                .fg(Color::Magenta)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Row::Leaf(attr) => {
                            let style = if leaf == self.selected {
                                selected_row = i;
                                Style::default().fg(Color::Black).bg(Color::Yellow)
                            } else {
                                Style::default()
                            };
                            leaf += 1;
                            Line::from(Span::styled(format!("  {attr}"), style))
                        }
                    })
                    .collect();
                let visible = usize::from(list_area.height.max(1));
                let offset = selected_row.saturating_sub(visible - 1) as u16;
                frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), list_area);
            }
        }

        let footer = Paragraph::new("↑↓: select  Home/End: jump  r: reload")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, footer_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nix::FlakeOutputGroup;
    use crate::tui::screens::test_support::{press, render};

    fn outputs() -> FlakeOutputs {
        FlakeOutputs {
            groups: vec![
                FlakeOutputGroup {
                    name: "devShells".into(),
                    attrs: vec!["x86_64-linux.default".into()],
                },
                FlakeOutputGroup {
                    name: "packages".into(),
                    attrs: vec!["x86_64-linux.default".into(), "x86_64-linux.hello".into()],
                },
            ],
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn down_moves_through_leaves_only() {
            let mut s = FlakeState::new(".");
            s.set_data(outputs());
            s.update(&press(KeyCode::Down));
            assert_eq!(s.selected_attr().as_deref(), Some("packages.x86_64-linux.default"));
            s.update(&press(KeyCode::Char('j')));
            s.update(&press(KeyCode::Down));
            assert_eq!(s.selected(), 2);
            assert_eq!(s.selected_attr().as_deref(), Some("packages.x86_64-linux.hello"));
        }

        #[test]
        fn home_and_end_jump() {
            let mut s = FlakeState::new(".");
            s.set_data(outputs());
            s.update(&press(KeyCode::End));
            assert_eq!(s.selected(), 2);
            s.update(&press(KeyCode::Home));
            assert_eq!(s.selected(), 0);
        }

        #[test]
        fn keys_without_data_stay_at_zero() {
            let mut s = FlakeState::new(".");
            assert!(s.update(&press(KeyCode::Down)).is_none());
            s.update(&press(KeyCode::End));
            assert_eq!(s.selected(), 0);
            assert_eq!(s.selected_attr(), None);
        }

        #[test]
        fn reload_with_fewer_outputs_clamps_selection() {
            let mut s = FlakeState::new(".");
            s.set_data(outputs());
            s.update(&press(KeyCode::End));
            s.set_data(FlakeOutputs {
                groups: vec![FlakeOutputGroup {
                    name: "packages".into(),
                    attrs: vec!["x86_64-linux.default".into()],
                }],
            });
            assert_eq!(s.selected(), 0);
            assert!(!s.is_loading());
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn without_data_prompts_for_refresh() {
            let output = render(&FlakeState::new("/src/app"), 60, 8);
            assert!(output.contains("Flake Browser"));
            assert!(output.contains("/src/app"));
            assert!(output.contains("Press r"));
        }

        #[test]
        fn loading_replaces_prompt() {
            let mut s = FlakeState::new(".");
            s.set_loading();
            assert!(s.is_loading());
            let output = render(&s, 60, 8);
            assert!(output.contains("Loading flake outputs"));
            assert!(!output.contains("Press r"));

            s.load_failed();
            assert!(render(&s, 60, 8).contains("Press r"));
        }

        #[test]
        fn lists_groups_and_outputs() {
            let mut s = FlakeState::new(".");
            s.set_data(outputs());
            let output = render(&s, 60, 10);
            assert!(output.contains("packages (2)"));
            assert!(output.contains("x86_64-linux.hello"));
        }

        #[test]
        fn empty_flake_says_so() {
            let mut s = FlakeState::new(".");
            s.set_data(FlakeOutputs::default());
            let output = render(&s, 60, 8);
            assert!(output.contains("no outputs"));
        }
    }
}
