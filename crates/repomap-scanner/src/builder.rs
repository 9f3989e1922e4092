//! Graph construction: traversal, per-file analysis, folder synthesis,
//! and import-edge resolution

use std::collections::{HashSet, HashMap};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use repomap_core::{content_hash, DependencyGraph, FileAnalysis, GraphNode, ScanError};

use crate::analyzer;
use crate::facts::{ImportKind, ImportSpec};
use crate::languages::{ProviderSet, SourceLang};
use crate::parser_pool::create_parser_pool;
use crate::resolve::{normalize, resolve_module, resolve_relative};
use crate::walker::{discover_with, SourceFile};

/// Everything known about one file after the parallel analysis phase.
struct FileRecord {
    id: String,
    label: String,
    byte_size: u64,
    hash: String,
    /// Slash-normalized containing directory.
    dir: String,
    lang: SourceLang,
    analysis: FileAnalysis,
    imports: Vec<ImportSpec>,
}

pub struct GraphBuilder {
    root: PathBuf,
    extra_excluded: Vec<String>,
}

impl GraphBuilder {
    pub fn new(root: &Path) -> Self {
        GraphBuilder {
            root: root.to_path_buf(),
            extra_excluded: Vec::new(),
        }
    }

    /// Prune additional directory names on top of the fixed exclusion set.
    pub fn with_excluded(mut self, dirs: Vec<String>) -> Self {
        self.extra_excluded = dirs;
        self
    }

    /// Build the dependency graph for the configured root.
    ///
    /// Fails only when the root is not a readable directory. Per-file read
    /// and parse failures degrade that file's analysis and the scan
    /// continues.
    pub fn build(&self) -> Result<DependencyGraph, ScanError> {
        let root_meta = std::fs::metadata(&self.root).map_err(|_| ScanError::InvalidPath {
            path: self.root.clone(),
        })?;
        if !root_meta.is_dir() {
            return Err(ScanError::InvalidPath {
                path: self.root.clone(),
            });
        }

        let files = discover_with(&self.root, &self.extra_excluded);
        tracing::info!("discovered {} source files", files.len());

        let providers = ProviderSet::new(create_parser_pool());

        // Independent per-file work fans out over rayon; the ordered collect
        // keeps discovery order for the merge.
        let records: Vec<FileRecord> = files
            .par_iter()
            .map(|file| self.analyze_file(file, &providers))
            .collect();

        let mut graph = DependencyGraph::new();
        let root_id = normalize(&self.root);

        // Folder nodes first, memoized per directory, then file nodes.
        let mut seen_dirs: HashSet<String> = HashSet::new();
        for record in &records {
            if record.dir != root_id && seen_dirs.insert(record.dir.clone()) {
                let label = record
                    .dir
                    .strip_prefix(&format!("{}/", root_id))
                    .unwrap_or(&record.dir)
                    .to_string();
                graph.add_node(GraphNode::folder(record.dir.clone(), label));
            }
        }
        for record in &records {
            let parent_id = (record.dir != root_id).then(|| record.dir.clone());
            graph.add_node(GraphNode::file(
                record.id.clone(),
                record.label.clone(),
                record.byte_size,
                record.hash.clone(),
                parent_id,
                record.analysis.clone(),
            ));
        }

        // Edge resolution must not start until every file is known: the
        // resolver matches candidates against the complete file set.
        let known: HashSet<String> = records.iter().map(|r| r.id.clone()).collect();
        let root_path = Path::new(&root_id).to_path_buf();
        let mut dependency_counts: HashMap<String, usize> = HashMap::new();
        for record in &records {
            let from_dir = Path::new(&record.dir);
            for import in &record.imports {
                let target = match (record.lang, import.kind) {
                    (SourceLang::Python, ImportKind::Module) => {
                        resolve_module(&import.specifier, from_dir, &root_path, &known)
                    }
                    _ => resolve_relative(&import.specifier, from_dir, &known),
                };
                if let Some(target) = target {
                    if graph.add_edge(&record.id, &target) {
                        *dependency_counts.entry(record.id.clone()).or_insert(0) += 1;
                    }
                }
            }
        }

        for (id, count) in dependency_counts {
            if let Some(analysis) = graph.node_mut(&id).and_then(|n| n.analysis_mut()) {
                analysis.dependency_count = count;
            }
        }

        tracing::info!(
            "built graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    fn analyze_file(&self, file: &SourceFile, providers: &ProviderSet) -> FileRecord {
        let dir = file
            .id
            .rsplit_once('/')
            .map(|(dir, _)| dir.to_string())
            .unwrap_or_default();
        let label = file
            .id
            .rsplit('/')
            .next()
            .unwrap_or(&file.id)
            .to_string();

        let content = match std::fs::read_to_string(&file.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("failed to read {}: {}", file.id, e);
                return FileRecord {
                    id: file.id.clone(),
                    label,
                    byte_size: 0,
                    hash: content_hash(&[]),
                    dir,
                    lang: file.lang,
                    analysis: FileAnalysis::degraded(""),
                    imports: Vec::new(),
                };
            }
        };

        let provider = providers.provider_for(file.lang);
        let (analysis, imports) = match provider.facts(&file.path, &content) {
            Ok(facts) => {
                let analysis = analyzer::analyze(&file.id, &content, &facts);
                (analysis, facts.imports)
            }
            Err(e) => {
                tracing::warn!("degrading analysis for {}: {}", file.id, e);
                (FileAnalysis::degraded(&content), Vec::new())
            }
        };

        FileRecord {
            id: file.id.clone(),
            label,
            byte_size: content.len() as u64,
            hash: content_hash(content.as_bytes()),
            dir,
            lang: file.lang,
            analysis,
            imports,
        }
    }
}
