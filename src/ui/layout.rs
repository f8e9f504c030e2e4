use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Regions of the single typing screen, top to bottom.
pub struct ScreenLayout {
    pub header: Rect,
    pub target: Rect,
    pub typing: Rect,
    pub results: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, target_text: &str, typed_text: &str, footer_lines: u16) -> Self {
        // borders take two columns and two rows
        let inner_width = area.width.saturating_sub(2) as usize;
        let cap = (area.height / 3).max(3);
        let target_rows = wrapped_line_count(target_text, inner_width).max(1) as u16 + 2;
        let typed_rows = typed_line_count(typed_text, inner_width).max(1) as u16 + 2;
        let typing_rows = target_rows.max(typed_rows);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(target_rows.min(cap).max(3)),
                Constraint::Length(typing_rows.min(cap).max(3)),
                Constraint::Min(4),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        Self {
            header: vertical[0],
            target: vertical[1],
            typing: vertical[2],
            results: vertical[3],
            footer: vertical[4],
        }
    }
}

/// Rows `text` occupies when word-wrapped at `width` columns. Words wider
/// than a row are broken across rows.
pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let mut rows = 1;
    let mut col = 0;
    for (i, word) in text.split(' ').enumerate() {
        let len = word.chars().count();
        let gap = usize::from(i > 0 && col > 0);
        if col + gap + len <= width {
            col += gap + len;
            continue;
        }
        if col > 0 {
            rows += 1;
        }
        col = len;
        while col > width {
            rows += 1;
            col -= width;
        }
    }
    rows
}

/// Rows the typing box needs for `typed` plus the trailing cursor cell.
pub fn typed_line_count(typed: &str, width: usize) -> usize {
    wrapped_line_count(&format!("{typed}\u{2588}"), width)
}

/// Greedily pack key hints into as few lines as fit `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    const PREFIX: &str = " ";
    const SEPARATOR: &str = "  ";

    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        if current.is_empty() {
            current = format!("{PREFIX}{hint}");
            continue;
        }
        let candidate = format!("{current}{SEPARATOR}{hint}");
        if candidate.chars().count() <= width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, format!("{PREFIX}{hint}")));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_pack_into_one_line_when_wide() {
        let lines = pack_hint_lines(&["[Enter] Submit", "[Esc] Quit"], 80);
        assert_eq!(lines, vec![" [Enter] Submit  [Esc] Quit"]);
    }

    #[test]
    fn hints_wrap_when_narrow() {
        let lines = pack_hint_lines(&["[Enter] Submit", "[Ctrl+N] Next", "[Esc] Quit"], 20);
        assert_eq!(lines, vec![" [Enter] Submit", " [Ctrl+N] Next", " [Esc] Quit"]);
    }

    #[test]
    fn empty_hints_are_skipped() {
        assert!(pack_hint_lines(&["", ""], 40).is_empty());
        assert!(pack_hint_lines(&["[Esc] Quit"], 0).is_empty());
    }

    #[test]
    fn wrapped_count_rounds_up() {
        assert_eq!(wrapped_line_count("abcdef", 4), 2);
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abc", 0), 0);
    }

    #[test]
    fn wrapped_count_breaks_at_words() {
        // "aa" | "bbbbb" | "cc": a char count would say two rows
        assert_eq!(wrapped_line_count("aa bbbbb cc", 6), 3);
        assert_eq!(wrapped_line_count("aa bb cc", 8), 1);
        assert_eq!(wrapped_line_count("abcdefghij", 4), 3);
    }

    #[test]
    fn cursor_cell_can_need_its_own_row() {
        assert_eq!(wrapped_line_count("abcd", 4), 1);
        assert_eq!(typed_line_count("abcd", 4), 2);
    }

    #[test]
    fn typing_box_grows_past_short_target() {
        let area = Rect::new(0, 0, 42, 30);
        let typed = "one two three four five six seven eight nine ten eleven twelve";
        let layout = ScreenLayout::new(area, "Short.", typed, 1);
        assert_eq!(layout.target.height, 3);
        assert_eq!(layout.typing.height, 2 + typed_line_count(typed, 40) as u16);
        assert!(layout.typing.height > layout.target.height);
    }

    #[test]
    fn typing_box_is_capped() {
        let area = Rect::new(0, 0, 22, 30);
        let typed = "word ".repeat(200);
        let layout = ScreenLayout::new(area, "Short.", &typed, 1);
        assert_eq!(layout.typing.height, 10);
    }

    #[test]
    fn layout_regions_stack_within_area() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = ScreenLayout::new(area, "The sun is bright today.", "", 1);
        assert_eq!(layout.header.y, 0);
        assert!(layout.target.y < layout.typing.y);
        assert!(layout.typing.y < layout.results.y);
        assert_eq!(layout.footer.y + layout.footer.height, 30);
    }
}
