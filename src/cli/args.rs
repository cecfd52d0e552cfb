use clap::{Parser, Subcommand};

use crate::provider::ProviderKind;
use crate::vocab::MissingSeparator;

#[derive(Parser, Debug)]
#[command(name = "anki-story")]
#[command(about = "Generate a short story that practices your Anki vocabulary")]
#[command(version)]
pub struct Args {
    /// Vocabulary export to read (reads from stdin if not provided)
    pub file: Option<String>,

    /// Language the story is written in (e.g. Spanish, French)
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Number of sentences in the story
    #[arg(short = 's', long)]
    pub sentences: Option<u32>,

    /// Number of vocabulary entries to sample
    #[arg(short = 'w', long)]
    pub words: Option<usize>,

    /// Extra guidance for the plot, sent verbatim
    #[arg(long, overrides_with = "no_narrative")]
    pub narrative: Option<String>,

    /// Leave out narrative guidance, even if one is saved
    #[arg(long, overrides_with = "narrative")]
    pub no_narrative: bool,

    /// Ask for an English translation after the story
    #[arg(long, overrides_with = "no_translate")]
    pub translate: bool,

    /// Do not ask for a translation, even if the saved default does
    #[arg(long, overrides_with = "translate")]
    pub no_translate: bool,

    /// Field separator between term and meaning ('\t' for Anki plain-text exports)
    #[arg(long)]
    pub separator: Option<String>,

    /// Drop lines that have no separator instead of using them without a meaning
    #[arg(long, overrides_with = "keep_glossless")]
    pub skip_glossless: bool,

    /// Use lines without a separator as terms with no meaning (the default)
    #[arg(long, overrides_with = "skip_glossless")]
    pub keep_glossless: bool,

    /// Which provider generates the story
    #[arg(short = 'p', long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Provider URL (local generate URL or cloud chat completion endpoint)
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// API key for the cloud provider (prefer the OPENAI_API_KEY environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Seed for vocabulary sampling, for a reproducible selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the prompt instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Remember the given options as new defaults
    #[arg(long)]
    pub save: bool,

    /// Show debug logs
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// `Some(false)` when `--no-translate` switches off a saved default.
    pub const fn translate_override(&self) -> Option<bool> {
        toggle(self.translate, self.no_translate)
    }

    pub const fn narrative_override(&self) -> Option<bool> {
        if self.no_narrative { Some(false) } else { None }
    }

    pub const fn missing_separator_override(&self) -> Option<MissingSeparator> {
        match toggle(self.skip_glossless, self.keep_glossless) {
            Some(true) => Some(MissingSeparator::Skip),
            Some(false) => Some(MissingSeparator::Keep),
            None => None,
        }
    }
}

const fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Edit the default settings interactively
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("anki-story").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_toggles_unset_by_default() {
        let args = parse(&[]);
        assert_eq!(args.translate_override(), None);
        assert_eq!(args.narrative_override(), None);
        assert_eq!(args.missing_separator_override(), None);
    }

    #[test]
    fn test_negative_flags_switch_off() {
        let args = parse(&["--no-translate", "--no-narrative", "--keep-glossless"]);
        assert_eq!(args.translate_override(), Some(false));
        assert_eq!(args.narrative_override(), Some(false));
        assert_eq!(
            args.missing_separator_override(),
            Some(MissingSeparator::Keep)
        );
    }

    #[test]
    fn test_last_flag_wins() {
        let args = parse(&["--no-translate", "--translate"]);
        assert_eq!(args.translate_override(), Some(true));

        let args = parse(&["--translate", "--no-translate"]);
        assert_eq!(args.translate_override(), Some(false));

        let args = parse(&["--keep-glossless", "--skip-glossless"]);
        assert_eq!(
            args.missing_separator_override(),
            Some(MissingSeparator::Skip)
        );

        let args = parse(&["--no-narrative", "--narrative", "At the beach."]);
        assert_eq!(args.narrative_override(), None);
        assert_eq!(args.narrative.as_deref(), Some("At the beach."));

        let args = parse(&["--narrative", "At the beach.", "--no-narrative"]);
        assert_eq!(args.narrative_override(), Some(false));
        assert!(args.narrative.is_none());
    }
}
