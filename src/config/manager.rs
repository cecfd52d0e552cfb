use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::provider::{
    DEFAULT_CLOUD_ENDPOINT, DEFAULT_CLOUD_MODEL, DEFAULT_LOCAL_MODEL, DEFAULT_LOCAL_URL,
    ProviderKind, ProviderSettings,
};
use crate::story::StoryRequest;
use crate::vocab::{DEFAULT_SEPARATOR, MissingSeparator, ParseOptions};
use crate::{fs as atomic_fs, paths};

pub const DEFAULT_LANGUAGE: &str = "Spanish";
pub const DEFAULT_SENTENCE_COUNT: u32 = 5;
pub const DEFAULT_WORD_COUNT: usize = 30;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// The `[story]` section: what kind of story to ask for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryConfig {
    /// Language the story is written in.
    pub language: Option<String>,
    /// Number of sentences.
    pub sentences: Option<u32>,
    /// Number of vocabulary entries to sample.
    pub words: Option<usize>,
    /// Narrative guidance text, kept even while disabled.
    pub narrative: Option<String>,
    /// Whether the narrative guidance is sent.
    pub use_narrative: Option<bool>,
    /// Ask for an English translation after the story.
    pub translate: Option<bool>,
}

/// The `[vocabulary]` section: where the export lives and how to split it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Last vocabulary file used.
    pub file: Option<String>,
    pub separator: Option<String>,
    pub missing_separator: Option<MissingSeparator>,
}

/// The `[provider.cloud]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    /// API key stored directly in config (not recommended).
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
}

impl CloudConfig {
    /// Gets the API key, preferring the environment variable over the config file.
    pub fn get_api_key(&self) -> Option<String> {
        let env_var = self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
        if let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|k| !k.is_empty())
    }
}

/// The `[provider.local]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    pub url: Option<String>,
    pub model: Option<String>,
}

/// The `[provider]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: Option<ProviderKind>,
    #[serde(default)]
    pub cloud: CloudConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/anki-story/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub story: StoryConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl ConfigFile {
    /// Copies every override given on the command line into the file.
    ///
    /// An API key passed with `--api-key` is not written back; keys belong in
    /// the environment.
    pub fn remember(&mut self, options: &ResolveOptions) {
        if let Some(file) = &options.file {
            self.vocabulary.file = Some(absolute_path(file));
        }
        if let Some(language) = &options.language {
            self.story.language = Some(language.clone());
        }
        if let Some(sentences) = options.sentences {
            self.story.sentences = Some(sentences);
        }
        if let Some(words) = options.words {
            self.story.words = Some(words);
        }
        if let Some(narrative) = &options.narrative {
            self.story.narrative = Some(narrative.clone());
        }
        if let Some(use_narrative) = options.narrative_enabled() {
            self.story.use_narrative = Some(use_narrative);
        }
        if let Some(translate) = options.translate {
            self.story.translate = Some(translate);
        }
        if let Some(separator) = &options.separator {
            self.vocabulary.separator = Some(separator.clone());
        }
        if let Some(policy) = options.missing_separator {
            self.vocabulary.missing_separator = Some(policy);
        }
        if let Some(kind) = options.provider {
            self.provider.kind = Some(kind);
        }

        let kind = options
            .provider
            .or(self.provider.kind)
            .unwrap_or_default();
        match kind {
            ProviderKind::Cloud => {
                if let Some(url) = &options.url {
                    self.provider.cloud.endpoint = Some(url.clone());
                }
                if let Some(model) = &options.model {
                    self.provider.cloud.model = Some(model.clone());
                }
            }
            ProviderKind::Local => {
                if let Some(url) = &options.url {
                    self.provider.local.url = Some(url.clone());
                }
                if let Some(model) = &options.model {
                    self.provider.local.model = Some(model.clone());
                }
            }
        }
    }
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub file: Option<String>,
    pub language: Option<String>,
    pub sentences: Option<u32>,
    pub words: Option<usize>,
    /// Narrative guidance; giving one enables it unless `use_narrative` says otherwise.
    pub narrative: Option<String>,
    pub use_narrative: Option<bool>,
    pub translate: Option<bool>,
    /// Separator as typed on the command line, escapes already expanded.
    pub separator: Option<String>,
    pub missing_separator: Option<MissingSeparator>,
    pub provider: Option<ProviderKind>,
    /// Local generate URL or cloud chat endpoint, depending on the provider.
    pub url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    /// The provider will not be contacted (dry run), so credentials are optional.
    pub offline: bool,
}

impl ResolveOptions {
    /// Whether the command line turns narrative guidance on or off.
    pub fn narrative_enabled(&self) -> Option<bool> {
        self.use_narrative
            .or_else(|| self.narrative.as_ref().map(|_| true))
    }
}

/// Saves relative vocabulary paths so they still resolve from another directory.
fn absolute_path(file: &str) -> String {
    std::path::absolute(file).map_or_else(
        |_| file.to_string(),
        |path| path.to_string_lossy().into_owned(),
    )
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Vocabulary file to read, or `None` for stdin.
    pub file: Option<String>,
    pub request: StoryRequest,
    pub parse: ParseOptions,
    pub provider: ProviderSettings,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI option, then config file, then built-in default.
///
/// # Errors
///
/// Returns an error if the target language or separator is empty, or if the
/// cloud provider is selected without an API key.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let story = &config_file.story;

    let target_language = options
        .language
        .as_ref()
        .or(story.language.as_ref())
        .map_or(DEFAULT_LANGUAGE, String::as_str)
        .trim()
        .to_string();
    if target_language.is_empty() {
        bail!(
            "Target language must not be empty\n\n\
             Please provide it via:\n  \
             - CLI option: anki-story --language <name>\n  \
             - Config file: ~/.config/anki-story/config.toml"
        );
    }

    let narrative_enabled = options
        .narrative_enabled()
        .or(story.use_narrative)
        .unwrap_or(false);
    let narrative = if narrative_enabled {
        options.narrative.clone().or_else(|| story.narrative.clone())
    } else {
        None
    };

    let word_count = options.words.or(story.words).unwrap_or(DEFAULT_WORD_COUNT);
    if word_count == 0 {
        tracing::warn!("word count is 0, no vocabulary will be included in the prompt");
    }

    let request = StoryRequest {
        target_language,
        sentence_count: options
            .sentences
            .or(story.sentences)
            .unwrap_or(DEFAULT_SENTENCE_COUNT),
        word_count,
        narrative,
        translate: options.translate.or(story.translate).unwrap_or(false),
    };

    let separator = options
        .separator
        .as_ref()
        .or(config_file.vocabulary.separator.as_ref())
        .map_or(DEFAULT_SEPARATOR, String::as_str)
        .to_string();
    if separator.is_empty() {
        bail!("Vocabulary separator must not be empty");
    }

    let missing_separator = options
        .missing_separator
        .or(config_file.vocabulary.missing_separator)
        .unwrap_or_default();

    let provider = resolve_provider(options, &config_file.provider)?;

    Ok(ResolvedConfig {
        file: options
            .file
            .clone()
            .or_else(|| config_file.vocabulary.file.clone()),
        request,
        parse: ParseOptions {
            separator,
            missing_separator,
        },
        provider,
    })
}

fn resolve_provider(options: &ResolveOptions, config: &ProviderConfig) -> Result<ProviderSettings> {
    let kind = options.provider.or(config.kind).unwrap_or_default();

    match kind {
        ProviderKind::Local => Ok(ProviderSettings::Local {
            url: options
                .url
                .clone()
                .or_else(|| config.local.url.clone())
                .unwrap_or_else(|| DEFAULT_LOCAL_URL.to_string()),
            model: options
                .model
                .clone()
                .or_else(|| config.local.model.clone())
                .unwrap_or_else(|| DEFAULT_LOCAL_MODEL.to_string()),
        }),
        ProviderKind::Cloud => {
            let api_key = options
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .or_else(|| config.cloud.get_api_key());

            let api_key = match api_key {
                Some(key) => key,
                None if options.offline => String::new(),
                None => {
                    let env_var = config
                        .cloud
                        .api_key_env
                        .as_deref()
                        .unwrap_or(DEFAULT_API_KEY_ENV);
                    bail!(
                        "The cloud provider requires an API key\n\n\
                         Set the {env_var} environment variable:\n  \
                         export {env_var}=\"your-api-key\"\n\n\
                         Or pass --api-key, or set api_key in ~/.config/anki-story/config.toml"
                    );
                }
            };

            Ok(ProviderSettings::Cloud {
                endpoint: options
                    .url
                    .clone()
                    .or_else(|| config.cloud.endpoint.clone())
                    .unwrap_or_else(|| DEFAULT_CLOUD_ENDPOINT.to_string()),
                model: options
                    .model
                    .clone()
                    .or_else(|| config.cloud.model.clone())
                    .unwrap_or_else(|| DEFAULT_CLOUD_MODEL.to_string()),
                api_key,
            })
        }
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/anki-story/config.toml`
    /// or `~/.config/anki-story/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a manager for an explicit config file path.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        atomic_fs::atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        tracing::debug!(path = %self.config_path.display(), "saved config");
        Ok(())
    }

    /// Loads the config file before it is modified and written back.
    ///
    /// A missing file starts from defaults; a file that fails to parse is an
    /// error, so saving never replaces settings it could not read.
    pub fn load_for_update(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            return Ok(ConfigFile::default());
        }
        self.load().with_context(|| {
            format!(
                "Refusing to overwrite {}; fix or remove it first",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file for reading only, falling back to defaults when it
    /// is missing or broken.
    pub fn load_or_default(&self) -> ConfigFile {
        if !self.config_path.exists() {
            return ConfigFile::default();
        }
        self.load().unwrap_or_else(|e| {
            tracing::warn!("{e:#}; using default settings");
            ConfigFile::default()
        })
    }
}
