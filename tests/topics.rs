use sentiment_garage::nlp::topics::{
    model_topics, parse_terms, Dictionary, TopicError, TopicModelConfig,
};

fn corpus() -> Vec<&'static str> {
    vec![
        "The football team won the match in the final minute.",
        "Our team trained hard before the football match.",
        "The coach praised every player after the match.",
        "A young player scored twice for the football team.",
        "The match ended with the team celebrating on the pitch.",
        "Fans cheered as the player ran across the pitch.",
        "The coach picked a new player for the next match.",
        "Football fans filled the stadium for the match.",
        "The team bus arrived at the stadium early.",
        "Every player on the team thanked the coach.",
        "She baked fresh bread in the kitchen oven.",
        "The recipe needs flour, butter and fresh eggs.",
        "He stirred the soup slowly in the kitchen.",
        "The oven was hot enough to bake the bread.",
        "Fresh butter makes the bread taste better.",
        "The soup recipe calls for garlic and onion.",
        "They shared the recipe for the garlic bread.",
        "The kitchen smelled of fresh bread and soup.",
        "Add flour slowly while the butter melts.",
        "The chef tasted the soup before serving the bread.",
    ]
}

#[test]
fn empty_input_yields_no_topics() {
    let sentences: Vec<&str> = Vec::new();
    let topics = model_topics(&sentences, &TopicModelConfig::default()).unwrap();
    assert!(topics.is_empty());
}

#[test]
fn large_corpus_yields_requested_topic_count() {
    let topics = model_topics(&corpus(), &TopicModelConfig::with_topics(2)).unwrap();
    assert_eq!(topics.len(), 2);
    for (expected_id, (id, terms)) in topics.iter().enumerate() {
        assert_eq!(*id, expected_id as i32);
        let parsed = parse_terms(terms);
        assert!(!parsed.is_empty() && parsed.len() <= 4, "{terms}");
        for (word, weight) in parsed {
            assert!(!word.is_empty());
            assert!(weight > 0.0 && weight <= 1.0, "{word}: {weight}");
        }
    }
}

#[test]
fn fitting_is_deterministic() {
    let config = TopicModelConfig::with_topics(3);
    let first = model_topics(&corpus(), &config).unwrap();
    let second = model_topics(&corpus(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn topic_count_is_capped_by_vocabulary() {
    let topics = model_topics(&["Cats chase mice."], &TopicModelConfig::default()).unwrap();
    assert_eq!(topics.len(), 3);
}

#[test]
fn stopword_only_input_has_empty_vocabulary() {
    let err = model_topics(&["It is.", "Was it?"], &TopicModelConfig::default()).unwrap_err();
    assert_eq!(err, TopicError::EmptyVocabulary);
    assert_eq!(err.to_string(), "Cannot compute topics over an empty vocabulary.");
}

#[test]
fn filter_extremes_drops_rare_and_ubiquitous_terms() {
    let docs: Vec<Vec<String>> = [
        vec!["common", "shared", "rare"],
        vec!["common", "shared"],
        vec!["common", "other"],
    ]
    .into_iter()
    .map(|d| d.into_iter().map(String::from).collect())
    .collect();
    let dictionary = Dictionary::from_documents(&docs);
    assert_eq!(dictionary.len(), 4);

    let filtered = dictionary.filter_extremes(2, 0.9);
    assert_eq!(filtered.len(), 1);
    assert!(filtered.id("shared").is_some());
    assert!(filtered.id("common").is_none());
    assert!(filtered.id("rare").is_none());
}

#[test]
fn printed_terms_parse_back() {
    let parsed = parse_terms(r#"0.120*"match" + 0.080*"team" + junk"#);
    assert_eq!(
        parsed,
        vec![("match".to_string(), 0.12), ("team".to_string(), 0.08)]
    );
}
