use sentiment_garage::{
    config::AnalysisSettings,
    model::Submission,
    nlp::Pipeline,
    report::{
        charts::{self, Chart, HISTOGRAM_BINS},
        mail::{build_message, compose_body, ATTACHMENT_NAME, SUBJECT},
        pdf::wrap_text,
        render_pdf, MailError,
    },
};

fn processed(sentences: &[&str]) -> Submission {
    let mut doc = Submission::pending(sentences.iter().copied());
    let update = Pipeline::new(&AnalysisSettings::default()).evaluate(doc.sentences.clone());
    update.apply_to(&mut doc);
    doc
}

fn sample() -> Submission {
    processed(&[
        "Dr. Smith opened the new clinic in London on Monday.",
        "Patients were happy with the friendly staff.",
        "Some complained that the waiting room was cold and crowded.",
        "The clinic plans to hire ten more nurses next year.",
    ])
}

#[test]
fn pdf_has_header_and_content() {
    let pdf = render_pdf(&sample()).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert!(pdf.len() > 1000);
}

#[test]
fn long_documents_paginate() {
    let text: Vec<String> = (0..80)
        .map(|i| format!("Sentence number {i} talks about a happy garden and a sad winter."))
        .collect();
    let refs: Vec<&str> = text.iter().map(String::as_str).collect();
    let pdf = render_pdf(&processed(&refs)).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn every_chart_is_built_for_a_processed_document() {
    let doc = sample();
    let keys: Vec<&str> = charts::build_charts(&doc).iter().map(|c| c.key).collect();
    assert_eq!(
        keys,
        vec![
            "sentiment_trend",
            "sentiment_distribution",
            "topics_terms",
            "overall_emotions",
            "sentiment_intensity",
            "emotional_shifts",
        ]
    );
}

#[test]
fn pending_document_has_no_data_charts() {
    let doc = Submission::pending(["Nothing analysed yet."]);
    let keys: Vec<&str> = charts::build_charts(&doc).iter().map(|c| c.key).collect();
    assert_eq!(keys, vec!["emotional_shifts"]);
}

#[test]
fn histogram_bins_cover_the_range() {
    let counts = charts::histogram(&[-1.0, -0.95, 0.0, 0.5, 1.0], -1.0, 1.0, HISTOGRAM_BINS);
    assert_eq!(counts.len(), HISTOGRAM_BINS);
    assert_eq!(counts.iter().sum::<usize>(), 5);
    assert_eq!(counts[0], 2);
    assert_eq!(counts[HISTOGRAM_BINS - 1], 1);
}

#[test]
fn distribution_chart_uses_twenty_bins() {
    let spec = charts::sentiment_distribution(&sample()).unwrap();
    match spec.chart {
        Chart::Histogram { min, max, counts } => {
            assert_eq!((min, max), (-1.0, 1.0));
            assert_eq!(counts.iter().sum::<usize>(), 4);
        }
        other => panic!("unexpected chart {other:?}"),
    }
}

#[test]
fn wrap_respects_width_and_keeps_words() {
    let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
    assert!(lines.iter().all(|l| l.chars().count() <= 10));
    assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
}

#[test]
fn email_body_greets_by_local_part() {
    let body = compose_body("ana.maria@example.com");
    assert!(body.starts_with("Hi Ana.maria,\n"));
    assert!(body.contains("PDF"));
}

#[test]
fn message_carries_subject_and_attachment() {
    let message = build_message("sender@example.com", "ana@example.com", b"%PDF-1.3".to_vec()).unwrap();
    let raw = String::from_utf8_lossy(&message.formatted()).to_string();
    assert!(raw.contains(&format!("Subject: {SUBJECT}")));
    assert!(raw.contains(ATTACHMENT_NAME));
    assert!(raw.contains("application/pdf"));
}

#[test]
fn bad_recipient_is_rejected() {
    let err = build_message("sender@example.com", "not an address", Vec::new()).unwrap_err();
    assert!(matches!(err, MailError::Address(addr) if addr == "not an address"));
}
