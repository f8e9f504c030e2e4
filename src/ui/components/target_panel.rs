use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::Level;
use crate::ui::theme::Theme;

pub struct TargetPanel<'a> {
    pub text: &'a str,
    pub level: Level,
    pub theme: &'a Theme,
}

impl Widget for TargetPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(format!(" Type this ({}) ", self.level))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(self.text)
            .style(Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
