use sentiment_garage::nlp::summarize::{lexrank_scores, summarize};

fn sentences() -> Vec<&'static str> {
    vec![
        "The city council approved the new park budget on Monday.",
        "The park budget includes funding for playgrounds and trees.",
        "Residents have asked the council for a bigger park for years.",
        "My cat sleeps on the windowsill every afternoon.",
        "Construction of the park is expected to start next spring.",
        "Council members said the budget vote was unanimous.",
        "The weather was cloudy during the morning commute.",
    ]
}

#[test]
fn short_input_is_returned_whole() {
    let input = ["First sentence.", "Second sentence."];
    assert_eq!(summarize(&input, 5), "First sentence. Second sentence.");
}

#[test]
fn empty_input_gives_empty_summary() {
    let input: [&str; 0] = [];
    assert_eq!(summarize(&input, 5), "");
}

#[test]
fn summary_is_bounded_and_verbatim_in_order() {
    let input = sentences();
    let summary = summarize(&input, 3);
    let picked: Vec<&str> = input.iter().copied().filter(|s| summary.contains(s)).collect();
    assert!(!picked.is_empty() && picked.len() <= 3, "{summary}");
    assert_eq!(picked.join(" "), summary);
}

#[test]
fn best_connected_sentence_ranks_first() {
    let input = sentences();
    let scores = lexrank_scores(&input);
    assert_eq!(scores.len(), input.len());
    let best = (0..scores.len())
        .max_by(|&a, &b| scores[a].total_cmp(&scores[b]))
        .unwrap();
    // the council approval shares vocabulary with three other sentences
    assert_eq!(best, 0);
    assert_eq!(summarize(&input, 1), input[0]);
}
