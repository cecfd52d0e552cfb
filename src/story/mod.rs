//! Story prompt composition and submission.

mod prompt;
mod submit;

pub use prompt::{StoryRequest, TRANSLATION_CLAUSE, compose_prompt};
pub use submit::{GENERATION_FAILED_MESSAGE, StoryDraft, Submission, submit_prompt};
