//! Sentence-level sentiment analysis service: intake API, analysis worker and reports.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod nlp;
pub mod report;
pub mod store;
pub mod worker;
