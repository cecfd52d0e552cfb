use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used by the plain-text vocabulary lists this tool was built around.
pub const DEFAULT_SEPARATOR: &str = " - ";

/// Lines starting with this marker (after leading whitespace) are ignored.
pub const COMMENT_MARKER: char = '#';

/// A single card from a vocabulary export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    /// Word or phrase in the language being learned. Never empty.
    pub term: String,
    /// Meaning in the learner's native language, if the line had one.
    pub gloss: Option<String>,
}

impl VocabularyEntry {
    pub fn new(term: impl Into<String>, gloss: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            gloss: Some(gloss.into()),
        }
    }

    pub fn glossless(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            gloss: None,
        }
    }
}

impl fmt::Display for VocabularyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.gloss {
            Some(gloss) => write!(f, "{} - {gloss}", self.term),
            None => f.write_str(&self.term),
        }
    }
}

/// What to do with a line that contains no separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSeparator {
    /// Keep the whole line as a term without a gloss.
    #[default]
    Keep,
    /// Drop the line.
    Skip,
}

/// How raw export text is split into entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub separator: String,
    pub missing_separator: MissingSeparator,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            missing_separator: MissingSeparator::default(),
        }
    }
}

impl ParseOptions {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }
}

/// Parses raw export text into vocabulary entries, in input order.
///
/// Blank lines and `#` comment lines are skipped. Each remaining line is split
/// once on the separator; anything after the first separator belongs to the
/// gloss. Malformed lines are dropped or kept according to `options`, never
/// reported as errors.
pub fn parse_vocabulary(text: &str, options: &ParseOptions) -> Vec<VocabularyEntry> {
    text.lines()
        .filter_map(|line| parse_line(line, options))
        .collect()
}

fn parse_line(line: &str, options: &ParseOptions) -> Option<VocabularyEntry> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
        return None;
    }

    // An empty separator would split before the first character
    let split = if options.separator.is_empty() {
        None
    } else {
        line.split_once(options.separator.as_str())
    };

    let entry = match split {
        Some((term, gloss)) => {
            let gloss = gloss.trim();
            VocabularyEntry {
                term: term.trim().to_string(),
                gloss: (!gloss.is_empty()).then(|| gloss.to_string()),
            }
        }
        None => match options.missing_separator {
            MissingSeparator::Keep => VocabularyEntry::glossless(trimmed),
            MissingSeparator::Skip => return None,
        },
    };

    if entry.term.is_empty() {
        return None;
    }

    Some(entry)
}

/// Expands backslash escapes typed on a command line (`\t`, `\n`, `\\`).
///
/// Shells pass `--separator '\t'` through as two characters, so the tab used by
/// Anki's plain-text export has to be spelled this way.
pub fn unescape_separator(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
