//! Thread-safe pool of tree-sitter parsers
//!
//! Tree-sitter parsers are not Sync, so each parser lives on a dedicated
//! worker thread fed over a channel. Rayon workers in the analysis phase
//! share one pool and call `parse_blocking`.

use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tree_sitter::{Language, Parser, Tree};

/// Grammar selection for a parse request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    TypeScript,
    Tsx,
    JavaScript,
    Python,
}

impl FileType {
    /// Determine the grammar from a file extension. Returns None for files
    /// outside the scanned language set.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "ts" => Some(FileType::TypeScript),
            "tsx" => Some(FileType::Tsx),
            "js" | "jsx" => Some(FileType::JavaScript),
            "py" => Some(FileType::Python),
            _ => None,
        }
    }

    pub fn language(&self) -> Language {
        match self {
            FileType::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            FileType::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            FileType::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            FileType::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }
}

/// A parsing request sent to the pool.
pub struct ParseRequest {
    pub file_type: FileType,
    pub content: String,
}

/// A parsed syntax tree plus the content it was parsed from.
pub struct ParseResult {
    pub tree: Tree,
    pub content: String,
}

struct WorkerRequest {
    request: ParseRequest,
    response_sender: mpsc::Sender<Result<ParseResult>>,
}

/// Pool of dedicated parser threads.
#[derive(Clone)]
pub struct ParserPool {
    sender: mpsc::Sender<WorkerRequest>,
}

impl ParserPool {
    pub fn new(num_workers: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<WorkerRequest>();
        let receiver = Arc::new(Mutex::new(receiver));

        for worker_id in 0..num_workers {
            let receiver = Arc::clone(&receiver);
            std::thread::spawn(move || {
                Self::worker_thread(worker_id, receiver);
            });
        }

        Self { sender }
    }

    fn worker_thread(worker_id: usize, receiver: Arc<Mutex<mpsc::Receiver<WorkerRequest>>>) {
        tracing::debug!("parser worker {} started", worker_id);

        let mut parser = Parser::new();

        loop {
            let next = {
                let guard = match receiver.lock() {
                    Ok(guard) => guard,
                    Err(_) => break,
                };
                guard.recv()
            };
            let WorkerRequest {
                request,
                response_sender,
            } = match next {
                Ok(req) => req,
                Err(_) => {
                    tracing::debug!("parser worker {} shutting down", worker_id);
                    break;
                }
            };

            let language = request.file_type.language();
            if let Err(e) = parser.set_language(&language) {
                let _ = response_sender.send(Err(anyhow::anyhow!("failed to set language: {}", e)));
                continue;
            }

            let result = match parser.parse(&request.content, None) {
                Some(tree) => Ok(ParseResult {
                    tree,
                    content: request.content,
                }),
                None => Err(anyhow::anyhow!("parser produced no tree")),
            };

            if response_sender.send(result).is_err() {
                tracing::warn!("parse result receiver dropped");
            }
        }
    }

    /// Parse content, blocking the calling thread until a worker responds.
    pub fn parse_blocking(&self, request: ParseRequest) -> Result<ParseResult> {
        let (response_sender, response_receiver) = mpsc::channel();

        self.sender
            .send(WorkerRequest {
                request,
                response_sender,
            })
            .map_err(|_| anyhow::anyhow!("parser pool is shut down"))?;

        response_receiver
            .recv()
            .map_err(|_| anyhow::anyhow!("parser worker died"))?
    }
}

/// Create a pool sized to the available parallelism, minimum 2 workers.
pub fn create_parser_pool() -> ParserPool {
    let num_workers = std::thread::available_parallelism()
        .map(|n| n.get().max(2))
        .unwrap_or(2);

    ParserPool::new(num_workers)
}
