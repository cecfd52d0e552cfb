#![allow(clippy::unwrap_used)]
//! End-to-end properties of sampling plus prompt composition.

use anki_story::story::{StoryDraft, StoryRequest, TRANSLATION_CLAUSE, compose_prompt};
use anki_story::vocab::{ParseOptions, VocabularyEntry, VocabularySelector};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn request(word_count: usize, translate: bool) -> StoryRequest {
    StoryRequest {
        target_language: "Spanish".to_string(),
        sentence_count: 5,
        word_count,
        narrative: None,
        translate,
    }
}

fn deck(count: usize) -> String {
    let mut text = String::from("#separator:tab\n#html:false\n");
    for i in 0..count {
        text.push_str(&format!("palabra{i}\tword{i}\n"));
        if i % 3 == 0 {
            text.push_str("  # note to self\n\n");
        }
    }
    text
}

#[test]
fn test_sample_bounded_by_request_and_input() {
    let selector = VocabularySelector::new(ParseOptions::with_separator("\t"));
    let text = deck(12);

    for seed in 0..10 {
        for n in [0, 1, 5, 12, 13, 100] {
            let mut rng = StdRng::seed_from_u64(seed);
            let draft = StoryDraft::prepare(&text, &request(n, false), &selector, &mut rng);

            assert_eq!(draft.vocabulary.len(), n.min(12));
            assert!(draft.vocabulary.iter().all(|e| !e.term.starts_with('#')));
            assert!(!draft.prompt.contains("note to self"));
        }
    }
}

#[test]
fn test_prompt_lists_selection_in_selected_order() {
    let selector = VocabularySelector::new(ParseOptions::with_separator("\t"));
    let mut rng = StdRng::seed_from_u64(8);
    let draft = StoryDraft::prepare(&deck(30), &request(10, false), &selector, &mut rng);

    let listed: Vec<&str> = draft.prompt.lines().skip(2).collect();
    let expected: Vec<String> = draft.vocabulary.iter().map(ToString::to_string).collect();
    assert_eq!(listed, expected);
}

#[test]
fn test_translation_toggle_only_adds_clause() {
    let vocabulary = vec![
        VocabularyEntry::new("gato", "cat"),
        VocabularyEntry::new("perro", "dog"),
    ];
    let plain = compose_prompt(&request(2, false), &vocabulary);
    let translated = compose_prompt(&request(2, true), &vocabulary);

    assert_eq!(
        translated.replacen(&format!("\n{TRANSLATION_CLAUSE}"), "", 1),
        plain
    );
}
