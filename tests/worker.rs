use std::sync::Arc;

use sentiment_garage::{
    config::AnalysisSettings,
    model::{OverallStatus, SentenceStatus, Submission},
    nlp::{
        ner::{Ner, Span},
        Pipeline,
    },
    store::{DocumentStore, DocumentUpdate, MemoryStore, UpdateOutcome},
    worker::Worker,
};

fn worker(store: &Arc<MemoryStore>, batch: usize) -> Worker {
    let shared: Arc<dyn DocumentStore> = store.clone();
    Worker::new(shared, Pipeline::new(&AnalysisSettings::default()), batch)
}

#[tokio::test]
async fn processes_pending_documents() {
    let store = Arc::new(MemoryStore::new());
    let doc = Submission::pending([
        "The concert last night was wonderful.",
        "The drive home in the rain was miserable.",
    ]);
    store.insert(&doc).await.unwrap();

    let completed = worker(&store, 8).process_pending().await.unwrap();
    assert_eq!(completed, 1);

    let stored = store.get(&doc.id).await.unwrap();
    assert_eq!(stored.overall_status, OverallStatus::Processed);
    assert!(stored.sentences.iter().all(|s| s.status == SentenceStatus::Processed));
    assert_eq!(stored.sentiment_trend.as_ref().map(Vec::len), Some(2));
    assert!(stored.summary.as_deref().is_some_and(|s| !s.is_empty()));
    assert!(stored.overall_emotions.is_some());
    assert!(stored.error_message.is_none());
}

struct PanickingNer;

impl Ner for PanickingNer {
    fn extract(&self, _text: &str) -> Vec<Span> {
        panic!("entity model crashed");
    }
}

#[tokio::test]
async fn panicking_stage_marks_document_as_error() {
    let store = Arc::new(MemoryStore::new());
    let doc = Submission::pending(["The staff were friendly and helpful."]);
    store.insert(&doc).await.unwrap();

    let shared: Arc<dyn DocumentStore> = store.clone();
    let pipeline = Pipeline::new(&AnalysisSettings::default()).with_ner(Arc::new(PanickingNer));
    let completed = Worker::new(shared, pipeline, 8).process_pending().await.unwrap();
    assert_eq!(completed, 1);

    let stored = store.get(&doc.id).await.unwrap();
    assert_eq!(stored.overall_status, OverallStatus::Error);
    assert!(stored
        .error_message
        .as_deref()
        .is_some_and(|m| m.starts_with("Analysis aborted")));
    assert!(stored.summary.is_none());
}

#[tokio::test]
async fn empty_documents_end_in_error() {
    let store = Arc::new(MemoryStore::new());
    let doc = Submission::pending(Vec::<String>::new());
    store.insert(&doc).await.unwrap();

    worker(&store, 8).process_pending().await.unwrap();

    let stored = store.get(&doc.id).await.unwrap();
    assert_eq!(stored.overall_status, OverallStatus::Error);
    assert_eq!(stored.error_message.as_deref(), Some("No sentences to process."));
    assert!(stored.summary.is_none());
}

#[tokio::test]
async fn batch_size_limits_each_pass() {
    let store = Arc::new(MemoryStore::new());
    for text in ["Happy dogs run.", "Sad cats sleep.", "Angry birds sing."] {
        store.insert(&Submission::pending([text])).await.unwrap();
    }
    let worker = worker(&store, 2);

    assert_eq!(worker.process_pending().await.unwrap(), 2);
    assert_eq!(worker.process_pending().await.unwrap(), 1);
    assert_eq!(worker.process_pending().await.unwrap(), 0);
}

#[tokio::test]
async fn finished_documents_are_not_rewritten() {
    let store = Arc::new(MemoryStore::new());
    let doc = Submission::pending(["A lovely day."]);
    store.insert(&doc).await.unwrap();
    store.update(&doc.id, &DocumentUpdate::failed("cancelled")).await.unwrap();

    let outcome = worker(&store, 8).process_document(doc.clone()).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::Skipped);

    let stored = store.get(&doc.id).await.unwrap();
    assert_eq!(stored.overall_status, OverallStatus::Error);
    assert_eq!(stored.error_message.as_deref(), Some("cancelled"));
}
