use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::SmallRng;

use crate::catalog::{ALL_LEVELS, Level, ParagraphCatalog};
use crate::config::Config;
use crate::cue::{Cue, CuePlayer};
use crate::grammar::GrammarChecker;
use crate::session::{KeystrokeOutcome, SessionController};
use crate::speech::{Dictation, Speaker};
use crate::ui::text_input::{InputResult, TextInput};
use crate::ui::theme::Theme;

/// Engines the host talks to. Built by `main` from config, or faked in tests.
pub struct Collaborators {
    pub grammar: Box<dyn GrammarChecker>,
    pub speaker: Arc<dyn Speaker>,
    pub cue_sink: Box<dyn Write>,
}

pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub should_quit: bool,
    catalog: ParagraphCatalog,
    session: SessionController,
    input: TextInput,
    grammar: Box<dyn GrammarChecker>,
    dictation: Dictation,
    cues: CuePlayer<Box<dyn Write>>,
    rng: SmallRng,
}

impl App {
    pub fn new(
        config: Config,
        catalog: ParagraphCatalog,
        theme: Theme,
        parts: Collaborators,
        rng: SmallRng,
    ) -> Self {
        let session = SessionController::new(
            config.start_level,
            "",
            config.tick_rate(),
            config.max_feedback,
        );
        let cues = CuePlayer::new(parts.cue_sink, config.sound_cues);
        let mut app = Self {
            config,
            theme,
            should_quit: false,
            catalog,
            session,
            input: TextInput::new(),
            grammar: parts.grammar,
            dictation: Dictation::new(parts.speaker),
            cues,
            rng,
        };
        let level = app.config.start_level;
        app.set_level(level);
        app
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn catalog(&self) -> &ParagraphCatalog {
        &self.catalog
    }

    pub fn level(&self) -> Level {
        self.session.level()
    }

    pub fn is_dictating(&self) -> bool {
        self.dictation.is_playing()
    }

    /// Switch level and load a fresh paragraph for it.
    pub fn set_level(&mut self, level: Level) {
        self.dictation.stop();
        self.input.clear();
        let target = self
            .session
            .select_paragraph(level, &self.catalog, &mut self.rng);
        tracing::debug!(%level, chars = target.chars().count(), "paragraph selected");
    }

    pub fn cycle_level(&mut self) {
        self.set_level(self.level().cycle());
    }

    /// New paragraph at the current level, which may have been changed by
    /// progression after the last completion.
    pub fn next_paragraph(&mut self) {
        self.set_level(self.level());
    }

    pub fn submit(&mut self, now: Instant) {
        let result = self.session.submit(self.input.value(), now, self.grammar.as_ref());
        tracing::debug!(wpm = result.wpm, "submitted");
        self.play(Cue::Completed);
    }

    pub fn dictate(&mut self) {
        let target = self.session.target().to_string();
        self.dictation.dictate(&target);
    }

    /// Returns true when the timer label needs a redraw.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.session.poll_refresh(now)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.next_paragraph(),
            KeyCode::Char('l') if ctrl => self.cycle_level(),
            KeyCode::Char('d') if ctrl => self.dictate(),
            KeyCode::F(n @ 1..=3) => self.set_level(ALL_LEVELS[usize::from(n - 1)]),
            _ => match self.input.handle(key) {
                InputResult::Cancel => self.should_quit = true,
                InputResult::Submit => self.submit(now),
                InputResult::Edited { inserted } => self.keystroke(inserted, now),
                InputResult::Unchanged => {}
            },
        }
    }

    fn keystroke(&mut self, inserted: Option<char>, now: Instant) {
        let KeystrokeOutcome { started, completed } = self.session.on_keystroke(
            self.input.value(),
            inserted,
            now,
            self.grammar.as_ref(),
        );
        if started {
            self.play(Cue::TimerStarted);
        }
        if completed {
            self.play(Cue::Completed);
        }
    }

    fn play(&mut self, cue: Cue) {
        if let Err(err) = self.cues.play(cue) {
            tracing::warn!(error = %err, ?cue, "audio cue failed");
        }
    }
}
