pub mod languagetool;

pub use languagetool::LanguageToolClient;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub message: String,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub length: usize,
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub replacements: Vec<String>,
}

impl GrammarIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: 0,
            length: 0,
            rule_id: None,
            replacements: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("grammar checker unavailable: {0}")]
    Unavailable(String),
    #[error("grammar request failed: {0}")]
    Http(String),
    #[error("grammar server returned status {0}")]
    Status(u16),
    #[error("could not decode grammar response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Proofreading engine consulted once per scoring.
pub trait GrammarChecker {
    fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, GrammarError>;
}

/// Reports no issues. Used when grammar checking is switched off.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledChecker;

impl GrammarChecker for DisabledChecker {
    fn check(&self, _text: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
        Ok(Vec::new())
    }
}

/// Outcome of a grammar pass after failures have been absorbed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrammarReport {
    pub issues: Vec<GrammarIssue>,
    pub warning: Option<String>,
}

/// Run the checker, turning any failure into an empty issue list plus a
/// warning the UI can show inline.
pub fn check_or_degrade(checker: &dyn GrammarChecker, text: &str) -> GrammarReport {
    match checker.check(text) {
        Ok(issues) => {
            tracing::debug!(issues = issues.len(), "grammar check finished");
            GrammarReport {
                issues,
                warning: None,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "grammar check failed, counting zero issues");
            GrammarReport {
                issues: Vec::new(),
                warning: Some(format!("Grammar check skipped: {err}")),
            }
        }
    }
}
