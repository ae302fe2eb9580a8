use std::time::Duration;

use sentiment_garage::config::Settings;

#[test]
fn local_settings_use_memory_store_and_no_credentials() {
    let settings = Settings::local();
    assert!(settings.mongo_uri.is_none());
    assert_eq!(settings.mongo_collection, "texts");
    assert!(settings.smtp.sender().is_none());
    assert_eq!(settings.analysis.num_topics, 5);
    assert_eq!(settings.analysis.summary_sentences, 5);
}

#[test]
fn sender_falls_back_to_username() {
    let mut settings = Settings::local();
    settings.smtp.username = Some("robot@example.com".to_string());
    assert_eq!(settings.smtp.sender(), Some("robot@example.com"));
    settings.smtp.from = Some("reports@example.com".to_string());
    assert_eq!(settings.smtp.sender(), Some("reports@example.com"));
}

#[test]
fn poll_interval_is_at_least_one_second() {
    let mut settings = Settings::local();
    settings.poll_interval_secs = 0;
    assert_eq!(settings.poll_interval(), Duration::from_secs(1));
}
