use std::time::{Duration, Instant};

use rand::Rng;

use crate::catalog::{Level, ParagraphCatalog};
use crate::grammar::GrammarChecker;
use crate::session::highlight::{self, MismatchSpan};
use crate::session::normalize;
use crate::session::result::{self, ScoringResult};
use crate::session::timer::RefreshTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Completed,
}

/// Transitions caused by a single event, reported so the host can play cues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeystrokeOutcome {
    pub started: bool,
    pub completed: bool,
}

pub struct SessionController {
    level: Level,
    /// Level the current target was drawn from; progression leaves it alone.
    paragraph_level: Level,
    target: String,
    phase: Phase,
    started_at: Option<Instant>,
    frozen_elapsed: Duration,
    mismatches: Vec<MismatchSpan>,
    result: Option<ScoringResult>,
    refresh: RefreshTimer,
    max_feedback: usize,
}

impl SessionController {
    pub fn new(level: Level, target: &str, refresh_period: Duration, max_feedback: usize) -> Self {
        Self {
            level,
            paragraph_level: level,
            target: target.to_string(),
            phase: Phase::Idle,
            started_at: None,
            frozen_elapsed: Duration::ZERO,
            mismatches: Vec::new(),
            result: None,
            refresh: RefreshTimer::new(refresh_period),
            max_feedback,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn paragraph_level(&self) -> Level {
        self.paragraph_level
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mismatches(&self) -> &[MismatchSpan] {
        &self.mismatches
    }

    pub fn result(&self) -> Option<&ScoringResult> {
        self.result.as_ref()
    }

    pub fn is_refresh_armed(&self) -> bool {
        self.refresh.is_armed()
    }

    /// Pick a paragraph for `level` and start over in Idle.
    pub fn select_paragraph<R: Rng + ?Sized>(
        &mut self,
        level: Level,
        catalog: &ParagraphCatalog,
        rng: &mut R,
    ) -> &str {
        let text = catalog.choose(level, rng);
        self.reset(level, text);
        &self.target
    }

    pub fn reset(&mut self, level: Level, target: String) {
        self.level = level;
        self.paragraph_level = level;
        self.target = target;
        self.phase = Phase::Idle;
        self.started_at = None;
        self.frozen_elapsed = Duration::ZERO;
        self.mismatches.clear();
        self.result = None;
        self.refresh.cancel();
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.phase, self.started_at) {
            (Phase::Running, Some(start)) => now.saturating_duration_since(start),
            (Phase::Completed, _) => self.frozen_elapsed,
            _ => Duration::ZERO,
        }
    }

    /// True when the live timer label is due for a redraw.
    pub fn poll_refresh(&mut self, now: Instant) -> bool {
        self.phase == Phase::Running && self.refresh.poll(now)
    }

    /// React to the buffer after a keystroke. `just_typed` is the character
    /// that was entered, if the key produced one.
    pub fn on_keystroke(
        &mut self,
        typed: &str,
        just_typed: Option<char>,
        now: Instant,
        checker: &dyn GrammarChecker,
    ) -> KeystrokeOutcome {
        let mut outcome = KeystrokeOutcome::default();

        if self.phase == Phase::Idle && just_typed == Some(' ') {
            self.start(now);
            outcome.started = true;
        }

        self.mismatches = highlight::mismatch_spans(typed, &self.target);

        if self.phase != Phase::Completed && normalize::matches_target(typed, &self.target) {
            self.complete(typed, now, checker);
            outcome.completed = true;
        }

        outcome
    }

    /// Force completion from any phase and score the buffer.
    pub fn submit(
        &mut self,
        typed: &str,
        now: Instant,
        checker: &dyn GrammarChecker,
    ) -> &ScoringResult {
        self.mismatches = highlight::mismatch_spans(typed, &self.target);
        self.complete(typed, now, checker)
    }

    fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.phase = Phase::Running;
        self.refresh.start(now);
        tracing::debug!(level = %self.level, "session started");
    }

    fn complete(
        &mut self,
        typed: &str,
        now: Instant,
        checker: &dyn GrammarChecker,
    ) -> &ScoringResult {
        if self.phase != Phase::Completed {
            self.frozen_elapsed = self.elapsed(now);
            self.phase = Phase::Completed;
        }
        self.refresh.cancel();

        let scored = result::compute_scoring(
            typed,
            self.frozen_elapsed,
            self.level,
            checker,
            self.max_feedback,
        );
        if scored.suggestion.changes_level(self.level) {
            tracing::info!(
                from = %self.level,
                to = %scored.suggestion.next_level,
                "level changed by progression"
            );
            self.level = scored.suggestion.next_level;
        }
        self.result.insert(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{DisabledChecker, GrammarError, GrammarIssue};
    use crate::session::result::MAX_FEEDBACK_MESSAGES;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const PERIOD: Duration = Duration::from_millis(100);

    fn controller(level: Level, target: &str) -> SessionController {
        SessionController::new(level, target, PERIOD, MAX_FEEDBACK_MESSAGES)
    }

    /// Feed `text` one character at a time, advancing the clock per key.
    fn type_text(
        session: &mut SessionController,
        buffer: &mut String,
        text: &str,
        t0: Instant,
        step: Duration,
    ) -> KeystrokeOutcome {
        let mut last = KeystrokeOutcome::default();
        for (i, ch) in text.chars().enumerate() {
            buffer.push(ch);
            let now = t0 + step * (i as u32 + 1);
            let outcome = session.on_keystroke(buffer, Some(ch), now, &DisabledChecker);
            last.started |= outcome.started;
            last.completed |= outcome.completed;
        }
        last
    }

    #[test]
    fn new_session_is_idle() {
        let session = controller(Level::Easy, "The sun is bright today.");
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.elapsed(Instant::now()), Duration::ZERO);
        assert!(session.result().is_none());
        assert!(!session.is_refresh_armed());
    }

    #[test]
    fn letters_before_first_space_do_not_start_clock() {
        let mut session = controller(Level::Easy, "The sun");
        let t0 = Instant::now();
        let outcome = session.on_keystroke("T", Some('T'), t0, &DisabledChecker);
        assert!(!outcome.started);
        assert_eq!(session.phase(), Phase::Idle);

        let outcome = session.on_keystroke("The ", Some(' '), t0, &DisabledChecker);
        assert!(outcome.started);
        assert_eq!(session.phase(), Phase::Running);
        assert!(session.is_refresh_armed());
    }

    #[test]
    fn typing_target_completes_and_freezes_elapsed() {
        let mut session = controller(Level::Medium, "The quick brown fox");
        let mut buffer = String::new();
        let t0 = Instant::now();
        let outcome = type_text(
            &mut session,
            &mut buffer,
            "The quick brown fox",
            t0,
            Duration::from_millis(100),
        );
        assert!(outcome.started && outcome.completed);
        assert_eq!(session.phase(), Phase::Completed);
        assert!(!session.is_refresh_armed());

        // started at the 4th key (first space), completed at the 19th
        let frozen = session.elapsed(t0 + Duration::from_secs(60));
        assert_eq!(frozen, Duration::from_millis(1500));
        assert_eq!(session.result().unwrap().elapsed, frozen);
    }

    #[test]
    fn completion_ignores_case_but_highlighting_does_not() {
        let mut session = controller(Level::Easy, "The quick brown fox");
        let t0 = Instant::now();
        session.on_keystroke("The ", Some(' '), t0, &DisabledChecker);
        let outcome = session.on_keystroke(
            "The Quick brown fox",
            Some('x'),
            t0 + Duration::from_secs(2),
            &DisabledChecker,
        );
        assert!(outcome.completed);
        assert_eq!(session.phase(), Phase::Completed);
        let flagged: Vec<usize> = session.mismatches().iter().map(|m| m.word_index).collect();
        assert_eq!(flagged, vec![1]);
    }

    #[test]
    fn extra_whitespace_still_completes() {
        let mut session = controller(Level::Easy, "The sun is bright today.");
        let t0 = Instant::now();
        session.on_keystroke("The ", Some(' '), t0, &DisabledChecker);
        let outcome = session.on_keystroke(
            "  the   sun is BRIGHT today. ",
            Some(' '),
            t0 + Duration::from_secs(3),
            &DisabledChecker,
        );
        assert!(outcome.completed);
    }

    #[test]
    fn single_word_target_completes_from_idle_with_zero_elapsed() {
        let mut session = controller(Level::Easy, "Hello");
        let outcome = session.on_keystroke("Hello", Some('o'), Instant::now(), &DisabledChecker);
        assert!(outcome.completed && !outcome.started);
        let result = session.result().unwrap();
        assert_eq!(result.elapsed, Duration::ZERO);
        assert_eq!(result.wpm, 0.0);
    }

    #[test]
    fn submit_before_start_scores_zero_elapsed() {
        let mut session = controller(Level::Easy, "The sun is bright today.");
        let result = session.submit("The", Instant::now(), &DisabledChecker);
        assert_eq!(result.elapsed, Duration::ZERO);
        assert_eq!(result.wpm, 0.0);
        assert_eq!(result.words, 1);
        assert_eq!(session.phase(), Phase::Completed);
    }

    #[test]
    fn submit_mid_run_freezes_at_submit_time() {
        let mut session = controller(Level::Hard, "Artificial intelligence is transforming technology.");
        let t0 = Instant::now();
        session.on_keystroke("Artificial ", Some(' '), t0, &DisabledChecker);
        session.submit("Artificial intel", t0 + Duration::from_secs(4), &DisabledChecker);
        assert_eq!(session.elapsed(t0 + Duration::from_secs(30)), Duration::from_secs(4));
        assert!(!session.is_refresh_armed());
        assert!(!session.poll_refresh(t0 + Duration::from_secs(30)));
    }

    #[test]
    fn keystrokes_after_completion_do_not_restart() {
        let mut session = controller(Level::Easy, "Hi there");
        let t0 = Instant::now();
        session.on_keystroke("Hi ", Some(' '), t0, &DisabledChecker);
        session.on_keystroke("Hi there", Some('e'), t0 + Duration::from_secs(1), &DisabledChecker);
        assert_eq!(session.phase(), Phase::Completed);

        let outcome =
            session.on_keystroke("Hi there ", Some(' '), t0 + Duration::from_secs(5), &DisabledChecker);
        assert_eq!(outcome, KeystrokeOutcome::default());
        assert_eq!(session.phase(), Phase::Completed);
        assert_eq!(session.elapsed(t0 + Duration::from_secs(9)), Duration::from_secs(1));
    }

    #[test]
    fn refresh_fires_only_while_running() {
        let mut session = controller(Level::Easy, "one two three");
        let t0 = Instant::now();
        assert!(!session.poll_refresh(t0 + PERIOD));
        session.on_keystroke("one ", Some(' '), t0, &DisabledChecker);
        assert!(session.poll_refresh(t0 + PERIOD));
        session.submit("one ", t0 + PERIOD * 2, &DisabledChecker);
        assert!(!session.poll_refresh(t0 + PERIOD * 10));
    }

    #[test]
    fn reset_returns_to_idle_and_clears_results() {
        let mut session = controller(Level::Easy, "a b");
        let t0 = Instant::now();
        session.on_keystroke("a ", Some(' '), t0, &DisabledChecker);
        session.on_keystroke("a x", Some('x'), t0, &DisabledChecker);
        assert!(!session.mismatches().is_empty());
        session.submit("a x", t0 + Duration::from_secs(1), &DisabledChecker);

        session.reset(Level::Hard, "c d".to_string());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.level(), Level::Hard);
        assert_eq!(session.paragraph_level(), Level::Hard);
        assert_eq!(session.target(), "c d");
        assert!(session.mismatches().is_empty());
        assert!(session.result().is_none());
        assert!(!session.is_refresh_armed());
    }

    #[test]
    fn select_paragraph_with_one_entry_is_idempotent() {
        let catalog = ParagraphCatalog::parse("Medium: The only one.");
        let mut session = controller(Level::Easy, "");
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(
                session.select_paragraph(Level::Medium, &catalog, &mut rng),
                "The only one."
            );
            assert_eq!(session.phase(), Phase::Idle);
        }
    }

    #[test]
    fn fast_accurate_easy_run_advances_level() {
        // 10 words in 15s = 40 wpm
        let target = "one two three four five six seven eight nine ten";
        let mut session = controller(Level::Easy, target);
        let t0 = Instant::now();
        session.on_keystroke("one ", Some(' '), t0, &DisabledChecker);
        session.on_keystroke(target, Some('n'), t0 + Duration::from_secs(15), &DisabledChecker);
        let result = session.result().unwrap();
        assert!(result.suggestion.message.contains("Medium"));
        assert_eq!(session.level(), Level::Medium);
        // the finished paragraph still belongs to Easy
        assert_eq!(session.paragraph_level(), Level::Easy);
        assert_eq!(session.target(), target);
    }

    #[test]
    fn sloppy_hard_run_reverts_to_medium() {
        struct Nitpicker;
        impl GrammarChecker for Nitpicker {
            fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
                // one issue per word: accuracy 0
                Ok(text.split_whitespace().map(GrammarIssue::new).collect())
            }
        }

        let mut session = controller(Level::Hard, "Artificial intelligence");
        session.submit("artifical inteligence", Instant::now(), &Nitpicker);
        assert_eq!(session.level(), Level::Medium);
        assert_eq!(session.result().unwrap().accuracy, 0.0);
    }
}
