use proptest::prelude::*;
use sentiment_garage::{
    model::Submission,
    report::{charts, emotion_intensity},
};

fn labelled(labels: &[&[&str]]) -> Submission {
    let mut doc = Submission::pending(labels.iter().map(|_| "sentence"));
    for (record, emotions) in doc.sentences.iter_mut().zip(labels) {
        record.emotions = emotions.iter().map(|e| e.to_string()).collect();
    }
    doc
}

#[test]
fn ratios_follow_sentence_counts() {
    let doc = labelled(&[&["Happy"], &["Sad"], &["Angry"], &["Happy"]]);
    let intensity = emotion_intensity(&doc);
    assert_eq!(intensity.len(), 3);
    assert_eq!(intensity["Happy"], 0.5);
    assert_eq!(intensity["Sad"], 0.25);
    assert_eq!(intensity["Angry"], 0.25);
}

#[test]
fn empty_document_has_no_ratios() {
    let doc = Submission::pending(Vec::<String>::new());
    assert!(emotion_intensity(&doc).is_empty());
}

#[test]
fn counts_preserve_first_seen_order() {
    let doc = labelled(&[&["Sad"], &["Happy", "Sad"], &["Fear"]]);
    let counts = charts::emotion_counts(&doc);
    let order: Vec<&str> = counts.keys().map(String::as_str).collect();
    assert_eq!(order, vec!["Sad", "Happy", "Fear"]);
    assert_eq!(counts["Sad"], 2);
}

proptest! {
    #[test]
    fn single_label_ratios_sum_to_one(picks in prop::collection::vec(0usize..6, 1..40)) {
        const LABELS: [&str; 6] = ["Happy", "Angry", "Surprise", "Sad", "Fear", "Neutral"];
        let labels: Vec<[&str; 1]> = picks.iter().map(|&i| [LABELS[i]]).collect();
        let refs: Vec<&[&str]> = labels.iter().map(|l| &l[..]).collect();
        let total: f64 = emotion_intensity(&labelled(&refs)).values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}
