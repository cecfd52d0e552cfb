//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Story generation command handler.
pub mod generate;
