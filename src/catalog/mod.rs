pub mod level;

pub use level::{ALL_LEVELS, Level};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;

pub const PLACEHOLDER_PARAGRAPH: &str = "No paragraph available.";

const BUILTIN_PARAGRAPHS: [(Level, &str); 3] = [
    (Level::Easy, "The sun is bright today."),
    (Level::Medium, "The quick brown fox jumps over the lazy dog."),
    (
        Level::Hard,
        "Artificial intelligence is transforming technology.",
    ),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Builtin,
}

impl CatalogSource {
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Builtin => "built-in samples".to_string(),
        }
    }
}

/// Practice paragraphs grouped by level.
#[derive(Clone, Debug)]
pub struct ParagraphCatalog {
    paragraphs: BTreeMap<Level, Vec<String>>,
    source: CatalogSource,
}

impl ParagraphCatalog {
    /// Load `<Level>: <text>` lines from `path`, falling back to the built-in
    /// samples when the file cannot be read. Invalid UTF-8 is replaced, not
    /// rejected.
    pub fn load(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => {
                let content = match String::from_utf8(bytes) {
                    Ok(content) => content,
                    Err(err) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %err.utf8_error(),
                            "paragraph file is not valid UTF-8, decoding lossily"
                        );
                        String::from_utf8_lossy(err.as_bytes()).into_owned()
                    }
                };
                let mut catalog = Self::parse(&content);
                catalog.source = CatalogSource::File(path.to_path_buf());
                tracing::info!(
                    path = %path.display(),
                    easy = catalog.count(Level::Easy),
                    medium = catalog.count(Level::Medium),
                    hard = catalog.count(Level::Hard),
                    "loaded paragraph catalog"
                );
                catalog
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "paragraph file unavailable, using built-in samples"
                );
                Self::builtin()
            }
        }
    }

    /// Parse catalog text. Lines without a known `Label:` prefix are skipped.
    pub fn parse(content: &str) -> Self {
        let mut paragraphs: BTreeMap<Level, Vec<String>> =
            ALL_LEVELS.iter().map(|&level| (level, Vec::new())).collect();

        for line in content.lines() {
            let line = line.trim();
            for level in ALL_LEVELS {
                if let Some(rest) = line
                    .strip_prefix(level.label())
                    .and_then(|r| r.strip_prefix(':'))
                {
                    paragraphs
                        .entry(level)
                        .or_default()
                        .push(rest.trim().to_string());
                }
            }
        }

        Self {
            paragraphs,
            source: CatalogSource::Builtin,
        }
    }

    pub fn builtin() -> Self {
        let paragraphs = BUILTIN_PARAGRAPHS
            .iter()
            .map(|&(level, text)| (level, vec![text.to_string()]))
            .collect();
        Self {
            paragraphs,
            source: CatalogSource::Builtin,
        }
    }

    pub fn paragraphs(&self, level: Level) -> &[String] {
        self.paragraphs
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, level: Level) -> usize {
        self.paragraphs(level).len()
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Uniformly random paragraph for `level`, or the placeholder when the
    /// level has none.
    pub fn choose<R: Rng + ?Sized>(&self, level: Level, rng: &mut R) -> String {
        self.paragraphs(level)
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_PARAGRAPH.to_string())
    }
}
