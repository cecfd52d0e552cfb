//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Confirm, CustomType, Select, Text};

use crate::config::{
    ConfigFile, ConfigManager, DEFAULT_LANGUAGE, DEFAULT_SENTENCE_COUNT, DEFAULT_WORD_COUNT,
};
use crate::provider::{
    DEFAULT_CLOUD_ENDPOINT, DEFAULT_CLOUD_MODEL, DEFAULT_LOCAL_MODEL, DEFAULT_LOCAL_URL,
    ProviderKind,
};
use crate::ui::{Style, handle_prompt_cancellation};
use crate::vocab::{DEFAULT_SEPARATOR, MissingSeparator, unescape_separator};

/// Runs the configure command.
///
/// With `show`, prints the stored defaults. Otherwise walks through every
/// setting interactively and saves the result.
pub fn run_configure(show: bool) -> Result<()> {
    if show {
        let manager = ConfigManager::new()?;
        let config = manager.load_or_default();
        print_current_defaults(&manager, &config);
        return Ok(());
    }
    handle_prompt_cancellation(run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_for_update()?;

    print_current_defaults(&manager, &config);

    let story = &mut config.story;
    story.language = Some(ask_text(
        "Target language:",
        story.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
    )?);
    story.sentences = Some(
        CustomType::<u32>::new("Number of sentences:")
            .with_default(story.sentences.unwrap_or(DEFAULT_SENTENCE_COUNT))
            .with_error_message("Please enter a whole number")
            .prompt()?,
    );
    story.words = Some(
        CustomType::<usize>::new("Number of vocabulary words:")
            .with_default(story.words.unwrap_or(DEFAULT_WORD_COUNT))
            .with_error_message("Please enter a whole number")
            .prompt()?,
    );
    story.translate = Some(
        Confirm::new("Append an English translation?")
            .with_default(story.translate.unwrap_or(false))
            .prompt()?,
    );

    let use_narrative = Confirm::new("Use narrative guidance?")
        .with_default(story.use_narrative.unwrap_or(false))
        .prompt()?;
    story.use_narrative = Some(use_narrative);
    if use_narrative {
        let mut prompt = Text::new("Narrative guidance:")
            .with_help_message("Sent verbatim, e.g. 'The story takes place at a night market.'");
        if let Some(current) = story.narrative.as_deref() {
            prompt = prompt.with_initial_value(current);
        }
        let narrative = prompt.prompt()?;
        story.narrative = (!narrative.trim().is_empty()).then_some(narrative);
    }

    let vocabulary = &mut config.vocabulary;
    let current_separator = vocabulary.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
    let separator = Text::new("Field separator:")
        .with_default(&current_separator.escape_debug().to_string())
        .with_help_message("Use \\t for Anki plain-text exports")
        .prompt()?;
    let separator = unescape_separator(&separator);
    if separator.is_empty() {
        bail!("Separator cannot be empty");
    }
    vocabulary.separator = Some(separator);
    vocabulary.missing_separator = Some(
        if Confirm::new("Skip lines without a separator?")
            .with_default(vocabulary.missing_separator == Some(MissingSeparator::Skip))
            .prompt()?
        {
            MissingSeparator::Skip
        } else {
            MissingSeparator::Keep
        },
    );

    let kinds = vec![ProviderKind::Local, ProviderKind::Cloud];
    let current_kind = config.provider.kind.unwrap_or_default();
    let kind = Select::new("Provider:", kinds.clone())
        .with_starting_cursor(kinds.iter().position(|k| *k == current_kind).unwrap_or(0))
        .prompt()?;
    config.provider.kind = Some(kind);

    match kind {
        ProviderKind::Local => {
            let local = &mut config.provider.local;
            local.url = Some(ask_text(
                "Local generate URL:",
                local.url.as_deref().unwrap_or(DEFAULT_LOCAL_URL),
            )?);
            local.model = Some(ask_text(
                "Local model:",
                local.model.as_deref().unwrap_or(DEFAULT_LOCAL_MODEL),
            )?);
        }
        ProviderKind::Cloud => {
            let cloud = &mut config.provider.cloud;
            cloud.endpoint = Some(ask_text(
                "Chat completion endpoint:",
                cloud.endpoint.as_deref().unwrap_or(DEFAULT_CLOUD_ENDPOINT),
            )?);
            cloud.model = Some(ask_text(
                "Cloud model:",
                cloud.model.as_deref().unwrap_or(DEFAULT_CLOUD_MODEL),
            )?);
            if cloud.get_api_key().is_none() {
                println!(
                    "{}",
                    Style::hint("No API key found. Set OPENAI_API_KEY or api_key in the config file.")
                );
            }
        }
    }

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn ask_text(message: &str, default: &str) -> Result<String> {
    let answer = Text::new(message).with_default(default).prompt()?;
    let answer = answer.trim();
    if answer.is_empty() {
        bail!("{} cannot be empty", message.trim_end_matches(':'));
    }
    Ok(answer.to_string())
}

fn print_current_defaults(manager: &ConfigManager, config: &ConfigFile) {
    let not_set = || Style::secondary("(not set)");
    let row = |label: &str, value: Option<String>| {
        println!(
            "  {:<12} {}",
            Style::label(label),
            value.map_or_else(not_set, Style::value)
        );
    };

    println!(
        "{} {}",
        Style::header("Current defaults"),
        Style::secondary(manager.config_path().display())
    );

    let story = &config.story;
    row("language", story.language.clone());
    row("sentences", story.sentences.map(|n| n.to_string()));
    row("words", story.words.map(|n| n.to_string()));
    row("translate", story.translate.map(|b| b.to_string()));
    row("narrative", story.narrative.clone());
    row("use_narrative", story.use_narrative.map(|b| b.to_string()));

    let vocabulary = &config.vocabulary;
    row("file", vocabulary.file.clone());
    row(
        "separator",
        vocabulary
            .separator
            .as_deref()
            .map(|s| format!("'{}'", s.escape_debug())),
    );
    row(
        "no separator",
        vocabulary.missing_separator.map(|p| match p {
            MissingSeparator::Keep => "keep".to_string(),
            MissingSeparator::Skip => "skip".to_string(),
        }),
    );

    let provider = &config.provider;
    row("provider", provider.kind.map(|k| k.to_string()));
    row("local url", provider.local.url.clone());
    row("local model", provider.local.model.clone());
    row("cloud url", provider.cloud.endpoint.clone());
    row("cloud model", provider.cloud.model.clone());
    row(
        "api key",
        Some(if provider.cloud.get_api_key().is_some() {
            "(set)".to_string()
        } else {
            "(not set)".to_string()
        }),
    );
    println!();
}
