//! repomap-scanner — file discovery, parsing, per-file analysis, and
//! dependency-graph construction

pub mod analyzer;
pub mod builder;
pub mod facts;
pub mod languages;
pub mod parser_pool;
pub mod resolve;
pub mod scan;
pub mod walker;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
pub mod tests;

pub use builder::GraphBuilder;
pub use facts::{ControlFlow, FactsProvider, ImportKind, ImportSpec, ParseFacts};
pub use languages::SourceLang;
pub use parser_pool::{create_parser_pool, FileType, ParserPool};
pub use scan::{scan, scan_with_config, ScanConfig, ScanResult};
