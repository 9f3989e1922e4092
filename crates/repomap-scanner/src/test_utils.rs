//! Test helpers for building throwaway source trees

use std::fs;
use tempfile::TempDir;

/// Create a temporary repository from (relative path, content) pairs.
pub fn create_repo_with_structure(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

/// A small mixed TypeScript/Python project with imports that resolve.
pub fn create_mixed_repo() -> TempDir {
    create_repo_with_structure(&[
        (
            "src/index.ts",
            r#"
import { fetchUsers } from "./services/users";
import config from "./config";

export function start() {
    if (config.enabled) {
        fetchUsers();
    }
}
"#,
        ),
        (
            "src/services/users.ts",
            r#"
import { request } from "../lib/http";

export function fetchUsers() {
    return request("/users");
}
"#,
        ),
        (
            "src/lib/http.ts",
            r#"
export function request(path: string) {
    return fetch(path).then(r => r.json());
}
"#,
        ),
        ("src/config.ts", "export default { enabled: true };\n"),
        (
            "app/main.py",
            r#"
from app.services import users

def main():
    for user in users.load():
        print(user)
"#,
        ),
        (
            "app/services/__init__.py",
            "",
        ),
        (
            "app/services/users.py",
            r#"
def load():
    return []
"#,
        ),
    ])
}
