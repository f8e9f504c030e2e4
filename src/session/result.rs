use std::time::Duration;

use crate::catalog::Level;
use crate::grammar::{self, GrammarChecker};
use crate::session::normalize::word_count;
use crate::session::progression::{self, Suggestion};

pub const MAX_FEEDBACK_MESSAGES: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct ScoringResult {
    pub elapsed: Duration,
    pub words: usize,
    pub wpm: f64,
    pub error_count: usize,
    pub accuracy: f64,
    pub messages: Vec<String>,
    pub grammar_warning: Option<String>,
    pub suggestion: Suggestion,
}

impl ScoringResult {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Time: {:.1}s | Speed: {:.2} WPM | Accuracy: {:.2}% | Errors: {}",
            self.elapsed_secs(),
            self.wpm,
            self.accuracy,
            self.error_count
        )
    }
}

/// Words per minute; zero when no time has elapsed.
pub fn words_per_minute(words: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 {
        return 0.0;
    }
    words as f64 / (secs / 60.0)
}

/// Grammar-based accuracy, clamped to [0, 100].
pub fn accuracy(error_count: usize, words: usize) -> f64 {
    let ratio = error_count as f64 / words.max(1) as f64;
    (100.0 - ratio * 100.0).clamp(0.0, 100.0)
}

/// Score a finished attempt. Grammar failures never abort scoring; they
/// surface as `grammar_warning` with zero issues counted.
pub fn compute_scoring(
    typed: &str,
    elapsed: Duration,
    level: Level,
    checker: &dyn GrammarChecker,
    max_messages: usize,
) -> ScoringResult {
    let trimmed = typed.trim();
    let words = word_count(trimmed);
    let wpm = words_per_minute(words, elapsed);

    let report = grammar::check_or_degrade(checker, trimmed);
    let error_count = report.issues.len();
    let accuracy = accuracy(error_count, words);
    let messages = report
        .issues
        .into_iter()
        .take(max_messages)
        .map(|issue| issue.message)
        .collect();

    let suggestion = progression::next_level_suggestion(level, accuracy, wpm);

    tracing::info!(
        level = %level,
        words,
        wpm,
        accuracy,
        errors = error_count,
        "attempt scored"
    );

    ScoringResult {
        elapsed,
        words,
        wpm,
        error_count,
        accuracy,
        messages,
        grammar_warning: report.warning,
        suggestion,
    }
}
