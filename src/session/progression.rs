use crate::catalog::Level;

pub const KEEP_PRACTICING: &str = "Keep practicing to improve your skills!";

#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    pub message: &'static str,
    pub next_level: Level,
}

impl Suggestion {
    pub fn changes_level(&self, current: Level) -> bool {
        self.next_level != current
    }
}

/// Thresholded level policy. Strict comparisons: exactly 90% accuracy does
/// not promote, exactly 70% does not demote.
pub fn next_level_suggestion(level: Level, accuracy: f64, speed: f64) -> Suggestion {
    match level {
        Level::Easy if accuracy > 90.0 && speed > 30.0 => Suggestion {
            message: "Good job! Try Medium level.",
            next_level: Level::Medium,
        },
        Level::Medium if accuracy > 90.0 && speed > 35.0 => Suggestion {
            message: "Great! Try Hard level.",
            next_level: Level::Hard,
        },
        Level::Hard if accuracy < 70.0 => Suggestion {
            message: "Consider practicing Medium level.",
            next_level: Level::Medium,
        },
        _ => Suggestion {
            message: KEEP_PRACTICING,
            next_level: level,
        },
    }
}
