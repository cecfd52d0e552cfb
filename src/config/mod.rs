//! Configuration file management and option resolution.

mod manager;

pub use manager::{
    CloudConfig, ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_LANGUAGE,
    DEFAULT_SENTENCE_COUNT, DEFAULT_WORD_COUNT, LocalConfig, ProviderConfig, ResolveOptions,
    ResolvedConfig, StoryConfig, VocabularyConfig, resolve_config,
};
