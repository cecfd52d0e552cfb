use crate::vocab::VocabularyEntry;

pub const STORY_CLAUSE_TEMPLATE: &str =
    "Write a short story in {target_language} consisting of {sentence_count} sentences.";

pub const TRANSLATION_CLAUSE: &str =
    "After the story, provide a direct translation of the story into English.";

pub const VOCABULARY_HEADER_TEMPLATE: &str =
    "The story should make use of the following {target_language} words/phrases:";

/// The options a learner picks for one story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    /// Language the story is written in (a name such as "Spanish", not a code).
    pub target_language: String,
    pub sentence_count: u32,
    /// How many vocabulary entries to sample.
    pub word_count: usize,
    /// Free-text steering hint, inserted verbatim.
    pub narrative: Option<String>,
    /// Ask for an English translation after the story.
    pub translate: bool,
}

/// Builds the instruction sent to the model.
///
/// Deterministic: randomness is resolved before this point, and `vocabulary`
/// is listed in the order given.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn compose_prompt(request: &StoryRequest, vocabulary: &[VocabularyEntry]) -> String {
    // {target_language} and {sentence_count} are placeholders, not format arguments
    let mut clauses = vec![
        STORY_CLAUSE_TEMPLATE
            .replace("{target_language}", &request.target_language)
            .replace("{sentence_count}", &request.sentence_count.to_string()),
    ];

    if let Some(narrative) = request.narrative.as_deref()
        && !narrative.trim().is_empty()
    {
        clauses.push(narrative.to_string());
    }

    if request.translate {
        clauses.push(TRANSLATION_CLAUSE.to_string());
    }

    clauses.push(VOCABULARY_HEADER_TEMPLATE.replace("{target_language}", &request.target_language));
    clauses.extend(vocabulary.iter().map(ToString::to_string));

    clauses.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn french() -> StoryRequest {
        StoryRequest {
            target_language: "French".to_string(),
            sentence_count: 3,
            word_count: 1,
            narrative: None,
            translate: false,
        }
    }

    #[test]
    fn test_compose_prompt_exact() {
        let prompt = compose_prompt(&french(), &[VocabularyEntry::new("chat", "cat")]);
        assert_eq!(
            prompt,
            "Write a short story in French consisting of 3 sentences.\n\
             The story should make use of the following French words/phrases:\n\
             chat - cat"
        );
    }

    #[test]
    fn test_compose_prompt_is_deterministic() {
        let vocabulary = vec![
            VocabularyEntry::new("chien", "dog"),
            VocabularyEntry::glossless("maison"),
        ];
        let mut request = french();
        request.narrative = Some("Set it in a lighthouse.".to_string());
        request.translate = true;

        assert_eq!(
            compose_prompt(&request, &vocabulary),
            compose_prompt(&request.clone(), &vocabulary.clone())
        );
    }

    #[test]
    fn test_translation_flag_adds_only_its_clause() {
        let vocabulary = vec![VocabularyEntry::new("chat", "cat")];
        let mut request = french();
        let without = compose_prompt(&request, &vocabulary);
        request.translate = true;
        let with = compose_prompt(&request, &vocabulary);

        let mut without_lines: Vec<&str> = without.lines().collect();
        let with_lines: Vec<&str> = with.lines().collect();
        without_lines.insert(1, TRANSLATION_CLAUSE);
        assert_eq!(with_lines, without_lines);
    }

    #[test]
    fn test_narrative_inserted_verbatim_after_base_clause() {
        let mut request = french();
        request.narrative = Some("  The hero is a talking cat.".to_string());
        request.translate = true;
        let prompt = compose_prompt(&request, &[VocabularyEntry::new("chat", "cat")]);

        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines[1], "  The hero is a talking cat.");
        assert_eq!(lines[2], TRANSLATION_CLAUSE);
    }

    #[test]
    fn test_blank_narrative_is_ignored() {
        let mut request = french();
        request.narrative = Some("   ".to_string());
        let vocabulary = [VocabularyEntry::new("chat", "cat")];

        assert_eq!(
            compose_prompt(&request, &vocabulary),
            compose_prompt(&french(), &vocabulary)
        );
    }

    #[test]
    fn test_vocabulary_order_is_preserved() {
        let vocabulary = vec![
            VocabularyEntry::new("zèbre", "zebra"),
            VocabularyEntry::new("abeille", "bee"),
            VocabularyEntry::glossless("mouton"),
        ];
        let prompt = compose_prompt(&french(), &vocabulary);
        let tail: Vec<&str> = prompt.lines().skip(2).collect();
        assert_eq!(tail, vec!["zèbre - zebra", "abeille - bee", "mouton"]);
    }

    #[test]
    fn test_templates_have_placeholders() {
        assert!(STORY_CLAUSE_TEMPLATE.contains("{target_language}"));
        assert!(STORY_CLAUSE_TEMPLATE.contains("{sentence_count}"));
        assert!(VOCABULARY_HEADER_TEMPLATE.contains("{target_language}"));
    }
}
