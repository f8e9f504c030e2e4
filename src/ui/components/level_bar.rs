use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::{ALL_LEVELS, Level};
use crate::ui::theme::Theme;

/// Header: level tabs on the left, the live timer on the right.
pub struct LevelBar<'a> {
    pub level: Level,
    pub elapsed: Duration,
    pub source: &'a str,
    /// Dictation is playing.
    pub speaking: bool,
    pub theme: &'a Theme,
}

pub fn timer_label(elapsed: Duration) -> String {
    format!("Timer: {:.1} sec", elapsed.as_secs_f64())
}

impl Widget for LevelBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut block = Block::bordered()
            .title(" typewell ")
            .title_bottom(Line::from(format!(" {} ", self.source)).right_aligned())
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()).fg(colors.header_fg()));
        if self.speaking {
            block = block.title(
                Line::from(Span::styled(
                    " speaking ",
                    Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(20)])
            .split(inner);

        let mut tabs = Vec::new();
        for (i, level) in ALL_LEVELS.iter().enumerate() {
            let label = format!(" F{} {} ", i + 1, level);
            let style = if *level == self.level {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.dim())
            };
            tabs.push(Span::styled(label, style));
            tabs.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(tabs)).render(columns[0], buf);

        Paragraph::new(timer_label(self.elapsed))
            .style(Style::default().fg(colors.accent()))
            .alignment(Alignment::Right)
            .render(columns[1], buf);
    }
}
