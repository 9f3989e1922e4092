//! Language-specific parse-facts providers

pub mod python;
pub mod typescript;

use std::path::Path;
use std::sync::Arc;

use crate::facts::FactsProvider;
use crate::parser_pool::ParserPool;

/// The two scanned language families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLang {
    /// TypeScript and JavaScript, including the JSX flavors.
    TypeScript,
    Python,
}

impl SourceLang {
    /// Partition a file by extension. Files matching neither language are
    /// ignored by the scan (not an error).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" | "tsx" | "js" | "jsx" => Some(SourceLang::TypeScript),
            "py" => Some(SourceLang::Python),
            _ => None,
        }
    }
}

/// Facts providers for every scanned language, sharing one parser pool.
pub struct ProviderSet {
    typescript: Arc<typescript::TypeScriptFacts>,
    python: Arc<python::PythonFacts>,
}

impl ProviderSet {
    pub fn new(pool: ParserPool) -> Self {
        ProviderSet {
            typescript: Arc::new(typescript::TypeScriptFacts::new(pool.clone())),
            python: Arc::new(python::PythonFacts::new(pool)),
        }
    }

    pub fn provider_for(&self, lang: SourceLang) -> Arc<dyn FactsProvider> {
        match lang {
            SourceLang::TypeScript => self.typescript.clone(),
            SourceLang::Python => self.python.clone(),
        }
    }
}
