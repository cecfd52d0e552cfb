use rand::Rng;

use super::prompt::{StoryRequest, compose_prompt};
use crate::provider::GenerationProvider;
use crate::vocab::{VocabularyEntry, VocabularySelector};

/// Shown to the user whenever generation fails, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str = "An error occurred while generating the story.";

/// Sampled vocabulary and the prompt built from it, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    pub vocabulary: Vec<VocabularyEntry>,
    pub prompt: String,
}

impl StoryDraft {
    pub fn prepare<R: Rng + ?Sized>(
        text: &str,
        request: &StoryRequest,
        selector: &VocabularySelector,
        rng: &mut R,
    ) -> Self {
        let vocabulary = selector.select(text, request.word_count, rng);
        let prompt = compose_prompt(request, &vocabulary);
        Self { vocabulary, prompt }
    }
}

/// Outcome of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Story(String),
    Failed,
}

impl Submission {
    /// Text to show the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Story(story) => story,
            Self::Failed => GENERATION_FAILED_MESSAGE,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Story(_))
    }
}

/// Sends `prompt` to `provider`.
///
/// Never fails: provider errors are logged and become [`Submission::Failed`].
pub async fn submit_prompt<P: GenerationProvider>(provider: &P, prompt: &str) -> Submission {
    match provider.generate(prompt).await {
        Ok(story) => Submission::Story(story),
        Err(err) => {
            tracing::error!(provider = provider.name(), error = %err, "story generation failed");
            Submission::Failed
        }
    }
}
