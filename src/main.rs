use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use anki_story::cli::commands::{configure, generate};
use anki_story::cli::{Args, Command};
use anki_story::config::ResolveOptions;
use anki_story::vocab::unescape_separator;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose, args.quiet);

    match args.command {
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        None => {
            let translate = args.translate_override();
            let use_narrative = args.narrative_override();
            let missing_separator = args.missing_separator_override();
            let options = generate::GenerateOptions {
                resolve: ResolveOptions {
                    file: args.file,
                    language: args.language,
                    sentences: args.sentences,
                    words: args.words,
                    narrative: args.narrative,
                    use_narrative,
                    translate,
                    separator: args.separator.as_deref().map(unescape_separator),
                    missing_separator,
                    provider: args.provider,
                    url: args.url,
                    model: args.model,
                    api_key: args.api_key,
                    offline: args.dry_run,
                },
                seed: args.seed,
                dry_run: args.dry_run,
                save: args.save,
                quiet: args.quiet,
            };

            let code = generate::run_generate(options).await?;
            if code != exitcode::OK {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so the story on stdout stays pipeable.
/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("anki_story={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
