use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::input::InputReader;
use crate::provider::Provider;
use crate::story::{GENERATION_FAILED_MESSAGE, StoryDraft, Submission, submit_prompt};
use crate::ui::{Spinner, Style};
use crate::vocab::VocabularySelector;

pub struct GenerateOptions {
    pub resolve: ResolveOptions,
    pub seed: Option<u64>,
    pub dry_run: bool,
    pub save: bool,
    pub quiet: bool,
}

/// Samples vocabulary, builds the prompt and prints the generated story.
///
/// Returns the process exit code. Generation failures are reported with a
/// single fixed message and `exitcode::UNAVAILABLE`; only configuration and
/// input problems surface as errors.
pub async fn run_generate(options: GenerateOptions) -> Result<exitcode::ExitCode> {
    let manager = ConfigManager::new()?;
    let mut file_config = if options.save {
        manager.load_for_update()?
    } else {
        manager.load_or_default()
    };
    let resolved = resolve_config(&options.resolve, &file_config)?;

    if options.save {
        file_config.remember(&options.resolve);
        manager.save(&file_config)?;
        if !options.quiet {
            eprintln!(
                "{} Defaults saved to {}",
                Style::success("✓"),
                Style::secondary(manager.config_path().display())
            );
        }
    }

    let text = InputReader::read(resolved.file.as_deref())?;
    let selector = VocabularySelector::new(resolved.parse.clone());

    let available = selector.count(&text);
    if available == 0 {
        eprintln!(
            "{} No vocabulary found in the input\n\n\
             Expected one card per line as 'term{}meaning'. \
             Use --separator to match your export.",
            Style::error("Error:"),
            resolved.parse.separator.escape_debug()
        );
        return Ok(exitcode::DATAERR);
    }

    let mut rng = options
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let draft = StoryDraft::prepare(&text, &resolved.request, &selector, &mut rng);

    tracing::info!(
        available,
        selected = draft.vocabulary.len(),
        provider = %resolved.provider.kind(),
        model = resolved.provider.model(),
        "prepared story prompt"
    );

    if options.dry_run {
        println!("{}", draft.prompt);
        return Ok(exitcode::OK);
    }

    let provider = Provider::from_settings(&resolved.provider);

    let spinner = (!options.quiet).then(|| Spinner::new("Generating story..."));
    let submission = submit_prompt(&provider, &draft.prompt).await;
    if let Some(spinner) = spinner {
        spinner.stop();
    }

    match submission {
        Submission::Story(story) => {
            println!("{story}");
            Ok(exitcode::OK)
        }
        Submission::Failed => {
            eprintln!("{}", Style::error(GENERATION_FAILED_MESSAGE));
            Ok(exitcode::UNAVAILABLE)
        }
    }
}
