//! AI summarizer collaborator for repomap
//!
//! This crate provides on-demand natural-language summaries of individual
//! source files. It is invoked lazily from the CLI and never participates
//! in graph construction.

pub mod cache;
pub mod providers;
pub mod summarizer;


pub use cache::SummaryCache;
pub use providers::create_provider;
pub use summarizer::{FileSummary, Summarizer};
