//! # anki-story - vocabulary practice stories
//!
//! `anki-story` reads a flashcard export, samples some of the words at random
//! and asks a language model for a short story that uses them.
//!
//! ## Quick Start
//!
//! ```bash
//! # Spanish story from a " - " separated list, local Ollama model
//! anki-story ./deck.txt
//!
//! # Anki plain-text export, French, via the cloud provider
//! anki-story --separator '\t' --language French --provider cloud ./deck.txt
//!
//! # Inspect the prompt without calling a model
//! anki-story --dry-run --seed 7 ./deck.txt
//! ```
//!
//! ## Configuration
//!
//! Defaults are stored in `~/.config/anki-story/config.toml`:
//!
//! ```toml
//! [story]
//! language = "Spanish"
//! sentences = 5
//! words = 30
//!
//! [vocabulary]
//! separator = "\t"
//!
//! [provider]
//! kind = "local"
//!
//! [provider.local]
//! url = "http://localhost:11434/api/generate"
//! model = "llama3"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and option resolution.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Generation providers (cloud chat completion, local generate).
pub mod provider;

/// Prompt composition and story submission.
pub mod story;

/// Terminal UI components (spinner, colors).
pub mod ui;

/// Vocabulary parsing and random selection.
pub mod vocab;
