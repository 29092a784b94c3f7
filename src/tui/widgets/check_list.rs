//! Pure formatting of health check results.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::health::{CheckResult, NamedCheck};

const DETAIL_INDENT: &str = "   ";

/// Renders one entry per check: a pass/fail glyph and title, followed by the
/// check's info and, for failures, the fix. Detail lines are cut to `width`.
pub fn render_check_list(checks: &[NamedCheck], width: u16) -> Text<'static> {
    let detail_style = Style::default().fg(Color::Gray);
    let max = usize::from(width).saturating_sub(DETAIL_INDENT.len());

    let mut lines = Vec::new();
    for nc in checks {
        let check = &nc.check;
        let (glyph, color) = if check.result.is_green() {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        let mut title = vec![
            Span::styled(
                glyph,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                check.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if check.required {
            title.push(Span::styled(
                " (required)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(title));

        if !check.info.is_empty() {
            lines.push(detail(&check.info, max, detail_style));
        }
        if let CheckResult::Red {
            message,
            suggestion,
        } = &check.result
        {
            let red = Style::default().fg(Color::Red);
            lines.push(detail(message, max, red));
            lines.push(detail(&format!("Fix: {suggestion}"), max, detail_style));
        }
    }
    Text::from(lines)
}

fn detail(text: &str, max: usize, style: Style) -> Line<'static> {
    Line::from(Span::styled(
        format!("{DETAIL_INDENT}{}", truncate(text, max)),
        style,
    ))
}

/// Cuts `text` to at most `max` characters, marking the cut with `…`.
/// A `max` of zero means no limit.
fn truncate(text: &str, max: usize) -> String {
    if max == 0 || text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::health::Check;

    fn check(title: &str, info: &str, result: CheckResult, required: bool) -> NamedCheck {
        NamedCheck::new(
            title.to_lowercase(),
            Check {
                title: title.into(),
                info: info.into(),
                result,
                required,
            },
        )
    }

    fn text_lines(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn green_check_shows_title_and_info() {
        let checks = [check("Flakes Enabled", "experimental-features = flakes", CheckResult::Green, true)];
        let lines = text_lines(&render_check_list(&checks, 80));
        assert_eq!(
            lines,
            [
                "✓ Flakes Enabled (required)",
                "   experimental-features = flakes"
            ]
        );
    }

    #[test]
    fn red_check_shows_message_and_fix() {
        let red = CheckResult::Red {
            message: "direnv is not installed".into(),
            suggestion: "install it".into(),
        };
        let lines = text_lines(&render_check_list(&[check("Direnv", "", red, false)], 80));
        assert_eq!(
            lines,
            ["✗ Direnv", "   direnv is not installed", "   Fix: install it"]
        );
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert!(render_check_list(&[], 80).lines.is_empty());
    }

    #[test]
    fn long_details_are_cut_to_width() {
        let checks = [check("Caches", &"x".repeat(100), CheckResult::Green, true)];
        let lines = text_lines(&render_check_list(&checks, 20));
        assert_eq!(lines[1].chars().count(), 20);
        assert!(lines[1].ends_with('…'));
    }

    #[quickcheck]
    fn truncate_respects_limit(text: String, max: u8) -> bool {
        let max = usize::from(max);
        let cut = truncate(&text, max);
        max == 0 || cut.chars().count() <= max
    }
}
