pub mod components;
pub mod layout;
pub mod text_input;
pub mod theme;

use std::time::Instant;

use ratatui::Frame;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::App;
use components::level_bar::LevelBar;
use components::results_panel::ResultsPanel;
use components::target_panel::TargetPanel;
use components::typing_box::TypingBox;
use layout::{ScreenLayout, pack_hint_lines};

const KEY_HINTS: [&str; 7] = [
    "[Enter] Submit",
    "[Ctrl+N] Next paragraph",
    "[F1-F3] Level",
    "[Ctrl+L] Cycle level",
    "[Ctrl+D] Dictate",
    "[Ctrl+W/U] Delete word/line",
    "[Esc] Quit",
];

pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let session = app.session();

    let hints = pack_hint_lines(&KEY_HINTS, area.width as usize);
    let layout = ScreenLayout::new(
        area,
        session.target(),
        app.input().value(),
        hints.len() as u16,
    );

    frame.render_widget(
        LevelBar {
            level: session.level(),
            elapsed: session.elapsed(now),
            source: &app.catalog().source().describe(),
            speaking: app.is_dictating(),
            theme: &app.theme,
        },
        layout.header,
    );
    frame.render_widget(
        TargetPanel {
            text: session.target(),
            level: session.paragraph_level(),
            theme: &app.theme,
        },
        layout.target,
    );
    frame.render_widget(
        TypingBox::new(
            app.input().value(),
            app.input().cursor(),
            session.mismatches(),
            &app.theme,
        ),
        layout.typing,
    );
    frame.render_widget(ResultsPanel::new(session.result(), &app.theme), layout.results);

    let footer: Vec<Line> = hints.into_iter().map(Line::from).collect();
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(colors.dim()).bg(colors.bg())),
        layout.footer,
    );
}
