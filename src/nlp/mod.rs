//! Natural language processing layer: segmentation and the analysis stages.

pub mod emotion;
pub mod ner;
pub mod pipeline;
pub mod sentiment;
pub mod summarize;
pub mod text;
pub mod topics;

pub use pipeline::{Analysis, Pipeline, PipelineError};
pub use text::split_sentences;
