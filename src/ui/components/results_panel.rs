use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::ScoringResult;
use crate::ui::theme::Theme;

pub const NO_ISSUES: &str = "Great! No grammar issues found.";
pub const FEEDBACK_HEADING: &str = "Grammar Feedback:";

const IDLE_HINT: &str =
    "Type the paragraph above. The timer starts at your first space; Enter submits early.";

pub struct ResultsPanel<'a> {
    result: Option<&'a ScoringResult>,
    theme: &'a Theme,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(result: Option<&'a ScoringResult>, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

/// Text lines of the result block, unstyled.
pub fn result_lines(result: &ScoringResult) -> Vec<String> {
    let mut lines = vec![result.summary_line(), result.suggestion.message.to_string()];
    lines.push(String::new());
    if let Some(warning) = &result.grammar_warning {
        lines.push(warning.clone());
    } else if result.messages.is_empty() {
        lines.push(NO_ISSUES.to_string());
    } else {
        lines.push(FEEDBACK_HEADING.to_string());
        lines.extend(result.messages.iter().map(|m| format!("- {m}")));
    }
    lines
}

impl Widget for ResultsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Results ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let Some(result) = self.result else {
            Paragraph::new(IDLE_HINT)
                .style(Style::default().fg(colors.dim()))
                .block(block)
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        };

        let accuracy_color = if result.accuracy >= 90.0 {
            colors.success()
        } else if result.accuracy >= 70.0 {
            colors.warning()
        } else {
            colors.error()
        };

        let mut lines: Vec<Line> = Vec::new();
        for (i, text) in result_lines(result).into_iter().enumerate() {
            let style = match i {
                0 => Style::default()
                    .fg(accuracy_color)
                    .add_modifier(Modifier::BOLD),
                1 => Style::default().fg(colors.accent()),
                _ if result.grammar_warning.is_some() => Style::default().fg(colors.warning()),
                _ if text == NO_ISSUES => Style::default().fg(colors.success()),
                _ if text == FEEDBACK_HEADING => {
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
                }
                _ => Style::default().fg(colors.error()),
            };
            lines.push(Line::from(Span::styled(text, style)));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
