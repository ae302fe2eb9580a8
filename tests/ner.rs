use sentiment_garage::{
    model::Entity,
    nlp::ner::{load_model, Ner, RuleNer},
};

fn entities(text: &str) -> Vec<(String, String)> {
    RuleNer
        .extract(text)
        .into_iter()
        .map(|span| (span.text, span.label))
        .collect()
}

fn has(found: &[(String, String)], text: &str, label: &str) -> bool {
    found.iter().any(|(t, l)| t == text && l == label)
}

#[test]
fn recognises_organisations_places_money_and_dates() {
    let found = entities("Apple paid $5 million to Google in Paris on Monday.");
    assert!(has(&found, "Apple", "ORG"), "{found:?}");
    assert!(has(&found, "$5 million", "MONEY"), "{found:?}");
    assert!(has(&found, "Google", "ORG"), "{found:?}");
    assert!(has(&found, "Paris", "GPE"), "{found:?}");
    assert!(has(&found, "Monday", "DATE"), "{found:?}");
    assert!(!found.iter().any(|(t, _)| t == "5"), "{found:?}");
}

#[test]
fn honorifics_mark_people() {
    let found = entities("Yesterday we met Dr. Smith at the clinic.");
    assert!(has(&found, "Smith", "PERSON"), "{found:?}");
}

#[test]
fn percentages_and_corporate_suffixes() {
    let found = entities("Sales at Acme Corp grew 12% last year.");
    assert!(has(&found, "Acme Corp", "ORG"), "{found:?}");
    assert!(has(&found, "12%", "PERCENT"), "{found:?}");
}

#[test]
fn plain_sentence_has_no_entities() {
    assert!(load_model().extract("the weather is nice and warm").is_empty());
}

#[test]
fn spans_convert_into_stored_entities() {
    let entity: Entity = RuleNer.extract("Tokyo").remove(0).into();
    assert_eq!(
        entity,
        Entity {
            text: "Tokyo".to_string(),
            label: "GPE".to_string()
        }
    );
}
