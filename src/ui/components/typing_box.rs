use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::highlight::MismatchSpan;
use crate::ui::layout::typed_line_count;
use crate::ui::theme::Theme;

/// The user's buffer with mismatched words marked and a block cursor.
pub struct TypingBox<'a> {
    text: &'a str,
    cursor: usize,
    mismatches: &'a [MismatchSpan],
    theme: &'a Theme,
}

impl<'a> TypingBox<'a> {
    pub fn new(
        text: &'a str,
        cursor: usize,
        mismatches: &'a [MismatchSpan],
        theme: &'a Theme,
    ) -> Self {
        Self {
            text,
            cursor,
            mismatches,
            theme,
        }
    }
}

impl Widget for TypingBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let normal = Style::default().fg(colors.fg());
        let mismatch = Style::default()
            .fg(colors.mismatch_fg())
            .bg(colors.mismatch_bg())
            .add_modifier(Modifier::UNDERLINED);
        let cursor = Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg());

        let mut spans: Vec<Span> = self
            .text
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let style = if i == self.cursor {
                    cursor
                } else if self.mismatches.iter().any(|m| m.contains(i)) {
                    mismatch
                } else {
                    normal
                };
                Span::styled(ch.to_string(), style)
            })
            .collect();
        if self.cursor >= self.text.chars().count() {
            spans.push(Span::styled(" ", cursor));
        }

        let block = Block::bordered()
            .title(" Your typing ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));

        // keep the cursor row in view once the buffer outgrows the box
        let inner = block.inner(area);
        let needed = typed_line_count(self.text, inner.width as usize) as u16;
        let scroll = needed.saturating_sub(inner.height);

        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::highlight::mismatch_spans;

    #[test]
    fn mismatched_word_uses_mismatch_style() {
        let theme = Theme::default();
        let typed = "the quikc";
        let spans = mismatch_spans(typed, "the quick");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TypingBox::new(typed, typed.chars().count(), &spans, &theme).render(area, &mut buf);

        // inner area starts at (1, 1)
        assert_eq!(buf[(1, 1)].symbol(), "t");
        assert_eq!(buf[(1, 1)].fg, theme.colors.fg());
        assert_eq!(buf[(5, 1)].symbol(), "q");
        assert_eq!(buf[(5, 1)].fg, theme.colors.mismatch_fg());
        assert!(buf[(5, 1)].modifier.contains(Modifier::UNDERLINED));
        // the space between words is never flagged
        assert_eq!(buf[(4, 1)].fg, theme.colors.fg());
    }

    #[test]
    fn cursor_at_end_draws_block() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        TypingBox::new("ab", 2, &[], &theme).render(area, &mut buf);
        assert_eq!(buf[(3, 1)].bg, theme.colors.cursor_bg());
    }

    #[test]
    fn long_buffer_scrolls_to_keep_cursor_visible() {
        let theme = Theme::default();
        // inner area is 6 wide and 1 tall
        let area = Rect::new(0, 0, 8, 3);
        let typed = "aaaa bbbb cccc";
        let mut buf = Buffer::empty(area);
        TypingBox::new(typed, typed.chars().count(), &[], &theme).render(area, &mut buf);

        assert_eq!(buf[(1, 1)].symbol(), "c");
        assert_eq!(buf[(5, 1)].bg, theme.colors.cursor_bg());
    }
}
