use sentiment_garage::nlp::emotion::{detect_emotions, emotion_scores, EMOTIONS, NEUTRAL};

#[test]
fn dominant_emotion_is_reported() {
    assert_eq!(detect_emotions("I am so happy and full of joy today."), vec!["Happy"]);
    assert_eq!(detect_emotions("The rainy weather makes me sad."), vec!["Sad"]);
    assert_eq!(detect_emotions("I am furious and angry about this."), vec!["Angry"]);
}

#[test]
fn ties_report_every_top_label() {
    let emotions = detect_emotions("I was happy but also afraid.");
    assert_eq!(emotions, vec!["Happy", "Fear"]);
}

#[test]
fn no_keywords_means_neutral() {
    assert_eq!(detect_emotions("The meeting starts at noon."), vec![NEUTRAL]);
    assert_eq!(detect_emotions(""), vec![NEUTRAL]);
    assert_eq!(
        detect_emotions("The latest release fixes two issues with the new cold storage."),
        vec![NEUTRAL]
    );
}

#[test]
fn scores_cover_every_label() {
    let scores = emotion_scores("happy happy sad");
    assert_eq!(scores.len(), EMOTIONS.len());
    assert!((scores["Happy"] - 0.67).abs() < 1e-9);
    assert!((scores["Sad"] - 0.33).abs() < 1e-9);
    assert_eq!(scores["Fear"], 0.0);
}
