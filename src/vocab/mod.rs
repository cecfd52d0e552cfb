//! Vocabulary parsing and random selection.
//!
//! Input is a flashcard export with one card per line, question and answer
//! separated by a configurable delimiter.

mod entry;
mod selector;

pub use entry::{
    COMMENT_MARKER, DEFAULT_SEPARATOR, MissingSeparator, ParseOptions, VocabularyEntry,
    parse_vocabulary, unescape_separator,
};
pub use selector::{VocabularySelector, select_vocabulary};
