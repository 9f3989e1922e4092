//! Per-file analysis: complexity, architecture role, design-pattern tags
//!
//! Role and pattern inference are plain substring/structure tests kept in
//! explicit ordered tables so the policy is testable without touching
//! traversal code. They are heuristic annotations; false positives are
//! acceptable.

use repomap_core::{ArchitectureRole, DesignPattern, FileAnalysis};

use crate::facts::ParseFacts;

/// Inputs for one role/pattern evaluation.
pub struct AnalysisContext<'a> {
    /// Slash-normalized path of the file.
    pub path: &'a str,
    pub content: &'a str,
    pub facts: &'a ParseFacts,
}

impl AnalysisContext<'_> {
    fn extension(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or("")
    }

    fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(self.path)
    }
}

struct RoleRule {
    role: ArchitectureRole,
    applies: fn(&AnalysisContext) -> bool,
}

/// Priority-ordered role rules; the first match wins and `Logic` is the
/// fallthrough default.
const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        role: ArchitectureRole::Verification,
        applies: |ctx| {
            let path = ctx.path;
            let name = ctx.file_name();
            path.contains("/__tests__/")
                || path.contains("/tests/")
                || path.contains("/test/")
                || name.contains(".test.")
                || name.contains(".spec.")
                || name.starts_with("test_")
                || name.ends_with("_test.py")
        },
    },
    RoleRule {
        role: ArchitectureRole::EdgeApi,
        applies: |ctx| {
            let content = ctx.content;
            ctx.path.contains("/api/")
                || ctx.path.contains("/routes/")
                || content.contains("express()")
                || content.contains("fastify(")
                || content.contains("Router(")
                || content.contains("app.get(")
                || content.contains("app.post(")
                || content.contains("@app.route")
                || content.contains("FastAPI(")
                || content.contains("APIRouter(")
                || content.contains("NextRequest")
        },
    },
    RoleRule {
        role: ArchitectureRole::Presentation,
        applies: |ctx| {
            let ext = ctx.extension();
            if ext == "tsx" || ext == "jsx" {
                return true;
            }
            let uses_hooks = ctx.content.contains("useState(")
                || ctx.content.contains("useEffect(")
                || ctx.content.contains("useContext(");
            uses_hooks && !ctx.facts.classes.is_empty()
        },
    },
    RoleRule {
        role: ArchitectureRole::ServiceLogic,
        applies: |ctx| {
            ctx.path.contains("/services/")
                || ctx.path.contains("/service/")
                || ctx.path.contains("/lib/")
                || ctx.path.contains("/utils/")
        },
    },
    RoleRule {
        role: ArchitectureRole::Orchestration,
        applies: |ctx| {
            let name = ctx.file_name();
            name == "__init__.py"
                || matches!(name, "index.ts" | "index.tsx" | "index.js" | "index.jsx")
        },
    },
];

struct PatternCheck {
    pattern: DesignPattern,
    applies: fn(&AnalysisContext) -> bool,
}

/// Independent, non-exclusive pattern checks.
const PATTERN_CHECKS: &[PatternCheck] = &[
    PatternCheck {
        pattern: DesignPattern::Proxy,
        applies: |ctx| ctx.content.contains("new Proxy("),
    },
    PatternCheck {
        pattern: DesignPattern::EventEmitter,
        applies: |ctx| {
            ctx.content.contains("EventEmitter")
                || (ctx.content.contains(".on(") && ctx.content.contains(".emit("))
        },
    },
    PatternCheck {
        pattern: DesignPattern::Configuration,
        applies: |ctx| {
            ctx.content.contains("BaseSettings") || ctx.content.contains("BaseConfig")
        },
    },
    PatternCheck {
        pattern: DesignPattern::AbstractBase,
        applies: |ctx| {
            ctx.content.contains("@abstractmethod")
                || ctx.content.contains("NotImplementedError")
                || ctx.content.contains("abstract ")
        },
    },
    PatternCheck {
        pattern: DesignPattern::SingletonModule,
        applies: |ctx| ctx.facts.export_count == 1 && ctx.facts.classes.len() == 1,
    },
    PatternCheck {
        pattern: DesignPattern::Provider,
        applies: |ctx| {
            ctx.content.contains("useContext(")
                || ctx.content.contains("createContext(")
                || ctx.content.contains(".Provider")
        },
    },
];

/// Control-flow density heuristic: declared functions and classes seed the
/// score, each control-flow occurrence adds one. Unbounded; compared only
/// relatively for hotspot ranking.
pub fn complexity_score(facts: &ParseFacts) -> u32 {
    (facts.functions.len() + facts.classes.len() + facts.control_flow.len()) as u32
}

pub fn infer_role(ctx: &AnalysisContext) -> ArchitectureRole {
    ROLE_RULES
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .map(|rule| rule.role)
        .unwrap_or(ArchitectureRole::Logic)
}

pub fn detect_patterns(ctx: &AnalysisContext) -> Vec<DesignPattern> {
    PATTERN_CHECKS
        .iter()
        .filter(|check| (check.applies)(ctx))
        .map(|check| check.pattern)
        .collect()
}

/// Analyze one file's facts into the final per-file metrics. Total function:
/// callers hand degraded inputs here too (empty facts still produce a valid
/// result). `dependency_count` is filled in after edge resolution.
pub fn analyze(path: &str, content: &str, facts: &ParseFacts) -> FileAnalysis {
    let ctx = AnalysisContext {
        path,
        content,
        facts,
    };
    FileAnalysis {
        functions: facts.functions.clone(),
        classes: facts.classes.clone(),
        variables: facts.variables.clone(),
        export_count: facts.export_count,
        loc: if content.is_empty() { 0 } else { content.lines().count() },
        complexity: complexity_score(facts),
        architecture_role: infer_role(&ctx),
        design_patterns: detect_patterns(&ctx),
        dependency_count: 0,
    }
}
