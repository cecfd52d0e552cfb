use rand::Rng;
use rand::seq::SliceRandom;

use super::entry::{ParseOptions, VocabularyEntry, parse_vocabulary};

/// Draws up to `n` entries uniformly at random, without replacement.
///
/// Uses a Fisher-Yates shuffle driven by `rng`, so a seeded generator gives a
/// reproducible sample. Returns every entry (shuffled) when fewer than `n` exist.
pub fn select_vocabulary<R: Rng + ?Sized>(
    mut entries: Vec<VocabularyEntry>,
    n: usize,
    rng: &mut R,
) -> Vec<VocabularyEntry> {
    if n == 0 {
        return Vec::new();
    }

    entries.shuffle(rng);
    entries.truncate(n);
    entries
}

/// Parses export text and samples from it in one step.
#[derive(Debug, Clone, Default)]
pub struct VocabularySelector {
    options: ParseOptions,
}

impl VocabularySelector {
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Number of usable entries in `text`.
    pub fn count(&self, text: &str) -> usize {
        parse_vocabulary(text, &self.options).len()
    }

    pub fn select<R: Rng + ?Sized>(
        &self,
        text: &str,
        n: usize,
        rng: &mut R,
    ) -> Vec<VocabularyEntry> {
        select_vocabulary(parse_vocabulary(text, &self.options), n, rng)
    }
}
