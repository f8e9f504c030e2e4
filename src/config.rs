use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::Level;
use crate::session::result::MAX_FEEDBACK_MESSAGES;
use crate::speech::command::default_program_and_args;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_paragraphs_path")]
    pub paragraphs_path: PathBuf,
    #[serde(default)]
    pub start_level: Level,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_true")]
    pub sound_cues: bool,
    #[serde(default = "default_max_feedback")]
    pub max_feedback: usize,
    #[serde(default)]
    pub grammar: GrammarConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_speech_program")]
    pub program: String,
    #[serde(default = "default_speech_args")]
    pub args: Vec<String>,
    #[serde(default = "default_speech_rate")]
    pub rate: u32,
}

fn default_paragraphs_path() -> PathBuf {
    PathBuf::from("paragraphs.txt")
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_tick_ms() -> u64 {
    100
}
fn default_true() -> bool {
    true
}
fn default_max_feedback() -> usize {
    MAX_FEEDBACK_MESSAGES
}
fn default_server_url() -> String {
    "http://localhost:8081".to_string()
}
fn default_language() -> String {
    "en-US".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_speech_program() -> String {
    default_program_and_args().0
}
fn default_speech_args() -> Vec<String> {
    default_program_and_args().1
}
fn default_speech_rate() -> u32 {
    110
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paragraphs_path: default_paragraphs_path(),
            start_level: Level::default(),
            theme: default_theme(),
            tick_ms: default_tick_ms(),
            sound_cues: default_true(),
            max_feedback: default_max_feedback(),
            grammar: GrammarConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            server_url: default_server_url(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            program: default_speech_program(),
            args: default_speech_args(),
            rate: default_speech_rate(),
        }
    }
}

impl Config {
    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typewell")
            .join("config.toml")
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }

    pub fn grammar_timeout(&self) -> Duration {
        Duration::from_secs(self.grammar.timeout_secs.max(1))
    }
}
