//! Integration tests for repomap
//!
//! These tests verify that the crates work together end to end through the
//! public scanning API.

use std::fs;

use repomap_core::ArchitectureRole;
use repomap_scanner::{scan, scan_with_config, ScanConfig};
use tempfile::TempDir;

fn write_tree(structure: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in structure {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
    }
    dir
}

#[test]
fn scan_of_small_typescript_project() {
    let dir = write_tree(&[
        (
            "src/index.ts",
            "import { getUsers } from \"./api/users\";\nexport function main() { return getUsers(); }\n",
        ),
        (
            "src/api/users.ts",
            "import { db } from \"../services/db\";\nexport function getUsers() { return db.query(\"users\"); }\n",
        ),
        (
            "src/services/db.ts",
            "export const db = { query(table: string) { return []; } };\n",
        ),
    ]);

    let result = scan(dir.path()).unwrap();

    assert_eq!(result.stats.total_files, 3);
    assert_eq!(result.edges.len(), 2);

    let index = result
        .nodes
        .iter()
        .find(|n| n.label() == "index.ts")
        .unwrap();
    let analysis = index.analysis().unwrap();
    assert!(analysis.functions.contains(&"main".to_string()));
    assert_eq!(analysis.dependency_count, 1);
    assert_eq!(analysis.architecture_role, ArchitectureRole::Orchestration);

    let users = result
        .nodes
        .iter()
        .find(|n| n.label() == "users.ts")
        .unwrap();
    assert_eq!(
        users.analysis().unwrap().architecture_role,
        ArchitectureRole::EdgeApi
    );

    let db = result.nodes.iter().find(|n| n.label() == "db.ts").unwrap();
    assert_eq!(
        db.analysis().unwrap().architecture_role,
        ArchitectureRole::ServiceLogic
    );
}

#[test]
fn scan_of_python_package() {
    let dir = write_tree(&[
        ("pkg/__init__.py", "from . import config\n"),
        (
            "pkg/config.py",
            "class Settings:\n    enabled = True\n\nsettings = Settings()\n",
        ),
        (
            "pkg/worker.py",
            "from .config import settings\n\ndef run():\n    if settings.enabled:\n        return True\n    return False\n",
        ),
    ]);

    let result = scan(dir.path()).unwrap();
    assert_eq!(result.stats.total_files, 3);

    let targets: Vec<&str> = result
        .edges
        .iter()
        .map(|e| e.target.rsplit('/').next().unwrap())
        .collect();
    assert!(targets.contains(&"config.py"));

    let worker = result
        .nodes
        .iter()
        .find(|n| n.label() == "worker.py")
        .unwrap();
    let analysis = worker.analysis().unwrap();
    assert!(analysis.functions.contains(&"run".to_string()));
    assert!(analysis.complexity >= 1);
}

#[test]
fn bare_specifiers_produce_no_edges() {
    let dir = write_tree(&[
        (
            "src/app.ts",
            "import React from \"react\";\nimport { z } from \"zod\";\nexport const app = 1;\n",
        ),
        ("src/other.ts", "export const other = 1;\n"),
    ]);

    let result = scan(dir.path()).unwrap();
    assert_eq!(result.stats.total_files, 2);
    assert!(result.edges.is_empty());
}

#[test]
fn vendor_and_build_output_are_skipped() {
    let dir = write_tree(&[
        ("vendor/lib.ts", "export const v = 1;\n"),
        ("node_modules/react/index.js", "module.exports = {};\n"),
        ("dist/bundle.js", "var x = 1;\n"),
        ("__pycache__/mod.py", "x = 1\n"),
        ("src/app.ts", "export const app = 1;\n"),
    ]);

    let result = scan(dir.path()).unwrap();
    assert_eq!(result.stats.total_files, 1);
    assert_eq!(result.nodes.iter().filter(|n| n.is_file()).count(), 1);
}

#[test]
fn hotspot_limit_is_configurable() {
    let dir = write_tree(&[
        ("a.ts", "export function a() { if (1) { return 1; } return 0; }\n"),
        ("b.ts", "export function b() { if (1) { return 1; } return 0; }\n"),
        ("c.ts", "export function c() { if (1) { return 1; } return 0; }\n"),
    ]);

    let config = ScanConfig {
        hotspot_limit: 2,
        ..ScanConfig::default()
    };
    let result = scan_with_config(dir.path(), &config).unwrap();
    assert_eq!(result.stats.top_complex_files.len(), 2);
}

#[test]
fn repeated_scans_serialize_identically() {
    let dir = write_tree(&[
        (
            "src/index.ts",
            "import { helper } from \"./util/helper\";\nexport const go = helper;\n",
        ),
        ("src/util/helper.ts", "export function helper() { return 1; }\n"),
        ("src/util/extra.ts", "export const extra = 2;\n"),
    ]);

    let first = serde_json::to_string(&scan(dir.path()).unwrap()).unwrap();
    let second = serde_json::to_string(&scan(dir.path()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn payload_round_trips_through_json() {
    let dir = write_tree(&[
        (
            "src/a.ts",
            "import { b } from \"./b\";\nexport class Thing { go() { return b; } }\n",
        ),
        ("src/b.ts", "export const b = 1;\n"),
    ]);

    let result = scan(dir.path()).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let restored: repomap_scanner::ScanResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, restored);
}
