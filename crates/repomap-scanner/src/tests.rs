//! Unit tests for repomap-scanner

use std::collections::HashSet;
use std::path::Path;

use repomap_core::ArchitectureRole;

use crate::scan::{scan, scan_with_config, ScanConfig};
use crate::test_utils::{create_mixed_repo, create_repo_with_structure};

#[test]
fn invalid_root_is_fatal() {
    let result = scan(Path::new("/definitely/not/a/real/path"));
    assert!(result.is_err());
    assert!(result.unwrap_err().is_fatal());
}

#[test]
fn file_root_is_invalid_path() {
    let dir = create_repo_with_structure(&[("a.ts", "")]);
    let file = dir.path().join("a.ts");
    let result = scan(&file);
    assert!(result.is_err());
}

#[test]
fn empty_directory_scans_to_empty_payload() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = scan(dir.path()).unwrap();
    assert!(result.nodes.is_empty());
    assert!(result.edges.is_empty());
    assert_eq!(result.stats.total_files, 0);
    assert_eq!(result.stats.average_complexity, 0.0);
}

#[test]
fn two_file_tree_end_to_end() {
    let dir = create_repo_with_structure(&[
        ("a.ts", "import { b } from \"./b\";\nexport const a = b;\n"),
        ("b.ts", "export const b = 1;\n"),
    ]);
    let result = scan(dir.path()).unwrap();

    let files: Vec<_> = result.nodes.iter().filter(|n| n.is_file()).collect();
    let folders: Vec<_> = result.nodes.iter().filter(|n| !n.is_file()).collect();
    assert_eq!(files.len(), 2);
    assert_eq!(folders.len(), 0);
    assert_eq!(result.stats.total_files, 2);

    assert_eq!(result.edges.len(), 1);
    let edge = &result.edges[0];
    assert!(edge.source.ends_with("/a.ts"));
    assert!(edge.target.ends_with("/b.ts"));
}

#[test]
fn mixed_repo_resolves_both_languages() {
    let dir = create_mixed_repo();
    let result = scan(dir.path()).unwrap();

    let edge_pairs: Vec<(String, String)> = result
        .edges
        .iter()
        .map(|e| {
            let tail = |s: &str| {
                let mut parts: Vec<&str> = s.rsplit('/').take(2).collect();
                parts.reverse();
                parts.join("/")
            };
            (tail(&e.source), tail(&e.target))
        })
        .collect();

    assert!(edge_pairs.contains(&("src/index.ts".into(), "services/users.ts".into())));
    assert!(edge_pairs.contains(&("src/index.ts".into(), "src/config.ts".into())));
    assert!(edge_pairs.contains(&("services/users.ts".into(), "lib/http.ts".into())));
    assert!(edge_pairs.contains(&("app/main.py".into(), "services/__init__.py".into())));
}

#[test]
fn scan_is_deterministic() {
    let dir = create_mixed_repo();
    let first = scan(dir.path()).unwrap();
    let second = scan(dir.path()).unwrap();
    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.edges, second.edges);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn no_self_edges_and_no_duplicates() {
    let dir = create_repo_with_structure(&[
        (
            "a.ts",
            // The same target imported three ways plus a self-import.
            "import { x } from \"./b\";\nexport { y } from \"./b\";\nconst z = require(\"./b\");\nimport { s } from \"./a\";\n",
        ),
        ("b.ts", "export const x = 1;\nexport const y = 2;\n"),
    ]);
    let result = scan(dir.path()).unwrap();

    let mut pairs = HashSet::new();
    for edge in &result.edges {
        assert_ne!(edge.source, edge.target, "self-edge produced");
        assert!(
            pairs.insert((edge.source.clone(), edge.target.clone())),
            "duplicate edge produced"
        );
    }
    assert_eq!(result.edges.len(), 1);

    let a_node = result
        .nodes
        .iter()
        .find(|n| n.id().ends_with("/a.ts"))
        .unwrap();
    assert_eq!(a_node.analysis().unwrap().dependency_count, 1);
}

#[test]
fn folder_invariant_holds() {
    let dir = create_mixed_repo();
    let result = scan(dir.path()).unwrap();

    let folder_ids: HashSet<&str> = result
        .nodes
        .iter()
        .filter(|n| !n.is_file())
        .map(|n| n.id())
        .collect();

    for node in result.nodes.iter().filter(|n| n.is_file()) {
        if let Some(parent) = node.parent_id() {
            assert!(
                folder_ids.contains(parent),
                "parentId {} has no folder node",
                parent
            );
        }
    }

    // The scan root itself never appears as a node.
    let root_id = crate::resolve::normalize(dir.path());
    assert!(result.nodes.iter().all(|n| n.id() != root_id));

    // Folder labels are root-relative.
    let services = result
        .nodes
        .iter()
        .find(|n| !n.is_file() && n.id().ends_with("src/services"))
        .unwrap();
    assert_eq!(services.label(), "src/services");
}

#[test]
fn files_at_root_have_no_parent() {
    let dir = create_repo_with_structure(&[("a.ts", "export const a = 1;\n")]);
    let result = scan(dir.path()).unwrap();
    assert_eq!(result.nodes.len(), 1);
    assert_eq!(result.nodes[0].parent_id(), None);
}

#[test]
fn excluded_subtrees_produce_no_nodes() {
    let dir = create_repo_with_structure(&[
        ("vendor/x.ts", "export const x = 1;\n"),
        ("node_modules/pkg/index.ts", "export const y = 1;\n"),
        ("src/app.ts", "export const app = 1;\n"),
    ]);
    let result = scan(dir.path()).unwrap();
    assert_eq!(result.stats.total_files, 1);
    assert!(result.nodes.iter().all(|n| !n.id().contains("/vendor/")));
    assert!(result
        .nodes
        .iter()
        .all(|n| !n.id().contains("/node_modules/")));
}

#[test]
fn extra_excluded_dirs_are_honored() {
    let dir = create_repo_with_structure(&[
        ("generated/x.ts", "export const x = 1;\n"),
        ("src/app.ts", "export const app = 1;\n"),
    ]);
    let config = ScanConfig {
        extra_excluded_dirs: vec!["generated".to_string()],
        ..ScanConfig::default()
    };
    let result = scan_with_config(dir.path(), &config).unwrap();
    assert_eq!(result.stats.total_files, 1);
}

#[test]
fn unparsable_file_degrades_without_aborting_siblings() {
    let dir = create_repo_with_structure(&[
        ("broken.ts", "function broken( { class }}}\nmore garbage\n"),
        ("fine.ts", "export function fine() { return 1; }\n"),
    ]);
    let result = scan(dir.path()).unwrap();
    assert_eq!(result.stats.total_files, 2);

    let fine = result
        .nodes
        .iter()
        .find(|n| n.id().ends_with("/fine.ts"))
        .unwrap();
    assert!(fine
        .analysis()
        .unwrap()
        .functions
        .contains(&"fine".to_string()));

    // tree-sitter still produces a tree for malformed input, so the broken
    // file gets best-effort facts rather than an abort; its node exists
    // and carries a line count either way.
    let broken = result
        .nodes
        .iter()
        .find(|n| n.id().ends_with("/broken.ts"))
        .unwrap();
    assert_eq!(broken.analysis().unwrap().loc, 2);
}

#[test]
fn non_utf8_file_degrades_to_defaults() {
    let dir = create_repo_with_structure(&[("ok.ts", "export const ok = 1;\n")]);
    std::fs::write(dir.path().join("bad.ts"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

    let result = scan(dir.path()).unwrap();
    assert_eq!(result.stats.total_files, 2);

    let bad = result
        .nodes
        .iter()
        .find(|n| n.id().ends_with("/bad.ts"))
        .unwrap();
    let analysis = bad.analysis().unwrap();
    assert_eq!(analysis.complexity, 0);
    assert!(analysis.functions.is_empty());
    assert_eq!(analysis.loc, 0);
}

#[test]
fn stats_are_consistent_with_nodes() {
    let dir = create_mixed_repo();
    let result = scan(dir.path()).unwrap();

    let files: Vec<_> = result.nodes.iter().filter(|n| n.is_file()).collect();
    assert_eq!(result.stats.total_files, files.len());

    let loc_sum: u64 = files
        .iter()
        .filter_map(|n| n.analysis())
        .map(|a| a.loc as u64)
        .sum();
    assert_eq!(result.stats.total_loc, loc_sum);

    let mean = files
        .iter()
        .filter_map(|n| n.analysis())
        .map(|a| a.complexity as f64)
        .sum::<f64>()
        / files.len() as f64;
    assert!((result.stats.average_complexity - (mean * 100.0).round() / 100.0).abs() < 1e-9);

    let labels: HashSet<&str> = files.iter().map(|n| n.label()).collect();
    let mut last_score = u32::MAX;
    for hotspot in &result.stats.top_complex_files {
        assert!(labels.contains(hotspot.name.as_str()));
        assert!(hotspot.score <= last_score);
        last_score = hotspot.score;
    }

    let breakdown_total: u64 = result.stats.layer_breakdown.values().sum();
    assert_eq!(breakdown_total, files.len() as u64);
}

#[test]
fn roles_show_up_in_layer_breakdown() {
    let dir = create_repo_with_structure(&[
        ("src/api/users/route.ts", "export function GET() { return null; }\n"),
        ("src/services/db.ts", "export function query() { return null; }\n"),
        ("src/__tests__/db.test.ts", "export function t() {}\n"),
    ]);
    let result = scan(dir.path()).unwrap();
    assert_eq!(result.stats.layer_breakdown["Edge/API"], 1);
    assert_eq!(result.stats.layer_breakdown["Service/Logic"], 1);
    assert_eq!(result.stats.layer_breakdown["Verification"], 1);

    let route = result
        .nodes
        .iter()
        .find(|n| n.id().ends_with("/route.ts"))
        .unwrap();
    assert_eq!(
        route.analysis().unwrap().architecture_role,
        ArchitectureRole::EdgeApi
    );
}

#[test]
fn payload_serializes_to_contract_shape() {
    let dir = create_repo_with_structure(&[
        ("src/a.ts", "import { b } from \"./b\";\nexport const a = b;\n"),
        ("src/b.ts", "export const b = 1;\n"),
    ]);
    let result = scan(dir.path()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    let nodes = json["nodes"].as_array().unwrap();
    // One folder (src) plus two files.
    assert_eq!(nodes.len(), 3);
    let file = nodes
        .iter()
        .find(|n| n["type"] == "file" && n["label"] == "a.ts")
        .unwrap();
    assert!(file["data"]["loc"].is_number());
    assert!(file["data"]["dependencyCount"].is_number());
    assert!(file["parentId"].is_string());
    assert!(file["hash"].is_string());

    let edges = json["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert!(edges[0]["id"].as_str().unwrap().starts_with("e-"));

    assert!(json["stats"]["averageComplexity"].is_number());
    assert!(json["stats"]["layerBreakdown"].is_object());
}
