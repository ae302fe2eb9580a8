use proptest::prelude::*;
use sentiment_garage::nlp::split_sentences;

#[test]
fn splits_on_terminal_punctuation() {
    let sentences = split_sentences("Hello world. How are you? I am fine!");
    assert_eq!(sentences, vec!["Hello world.", "How are you?", "I am fine!"]);
}

#[test]
fn keeps_abbreviations_and_initials_together() {
    let sentences = split_sentences("Dr. Smith met J. R. Tolkien. They talked for hours.");
    assert_eq!(
        sentences,
        vec!["Dr. Smith met J. R. Tolkien.", "They talked for hours."]
    );
}

#[test]
fn short_words_that_end_sentences_still_split() {
    let sentences =
        split_sentences("I asked for a refund and they said no. I am never shopping there again.");
    assert_eq!(
        sentences,
        vec![
            "I asked for a refund and they said no.",
            "I am never shopping there again."
        ]
    );
    assert_eq!(
        split_sentences("We flew home in mar. It was cold."),
        vec!["We flew home in mar.", "It was cold."]
    );
}

#[test]
fn numbered_abbreviations_need_a_number() {
    assert_eq!(
        split_sentences("Room No. 5 was noisy. See Fig. 2 for details."),
        vec!["Room No. 5 was noisy.", "See Fig. 2 for details."]
    );
}

#[test]
fn closing_quotes_stay_with_their_sentence() {
    let sentences = split_sentences("She said \"stop!\" Then she left.");
    assert_eq!(sentences, vec!["She said \"stop!\"", "Then she left."]);
}

#[test]
fn text_without_terminator_is_one_sentence() {
    assert_eq!(split_sentences("  just a fragment  "), vec!["just a fragment"]);
}

#[test]
fn blank_text_has_no_sentences() {
    assert!(split_sentences(" \n\t ").is_empty());
}

fn non_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn segments_are_non_empty_and_lossless(text in "[A-Za-z .!?\n]{0,200}") {
        let sentences = split_sentences(&text);
        for sentence in &sentences {
            prop_assert!(!sentence.trim().is_empty());
            prop_assert_eq!(sentence.trim(), sentence.as_str());
        }
        prop_assert_eq!(non_whitespace(&sentences.concat()), non_whitespace(&text));
    }
}
