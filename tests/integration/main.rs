//! Integration tests for Codeweb
//!
//! These tests run the whole pipeline: walk, extract, write, link, persist,
//! and the CLI on top of it.

use codeweb_core::{CallEdge, GraphSession, GraphStore};
use codeweb_indexer::{ImportConfig, Importer};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

fn demo_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_tree(
        dir.path(),
        &[
            ("src/a.py", "def helper(): return 1\n"),
            ("src/b.py", "def run(): return helper()\n"),
        ],
    );
    dir
}

fn codeweb(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codeweb"))
        .args(args)
        .current_dir(cwd)
        .env_remove("CODEWEB_STORE")
        .env_remove("CODEWEB_PROJECT")
        .env_remove("CODEWEB_LOG")
        .output()
        .expect("Failed to execute codeweb")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_session_round_trip() {
    let tree = demo_tree();
    let store = tree.path().join("out").join("graph.json");

    let mut session = GraphSession::open(&store).unwrap();
    {
        let mut importer = Importer::new(session.graph_mut(), ImportConfig::default());
        importer.set_project("demo").unwrap();
        let report = importer.import_directory(&tree.path().join("src")).unwrap();
        assert_eq!(report.imported, 2);
    }
    session.commit().unwrap();

    let session = GraphSession::open(&store).unwrap();
    let graph = session.graph();
    let a = fs::canonicalize(tree.path().join("src/a.py")).unwrap();
    let b = fs::canonicalize(tree.path().join("src/b.py")).unwrap();

    assert_eq!(graph.list_projects().unwrap(), vec!["demo"]);
    assert_eq!(
        graph.calls(),
        vec![CallEdge {
            from: b,
            to: a,
            function: "helper".to_string(),
        }]
    );

    let code = graph.project_code("demo").unwrap().unwrap();
    assert!(code.contains("def helper(): return 1"));
    assert!(code.contains("def run(): return helper()"));
    assert!(code.contains("\n\n"));
    session.close();
}

#[test]
fn test_batches_link_only_within_themselves() {
    let tree = demo_tree();
    let src = tree.path().join("src");
    let store = tree.path().join("graph.json");

    // Two separate single-file batches never see each other's definitions.
    for name in ["a.py", "b.py"] {
        let mut session = GraphSession::open(&store).unwrap();
        {
            let mut importer = Importer::new(session.graph_mut(), ImportConfig::default());
            importer.import_file(&src.join(name)).unwrap();
            importer.link();
        }
        session.commit().unwrap();
    }
    let session = GraphSession::open(&store).unwrap();
    assert_eq!(session.graph().node_count(), 4);
    assert!(session.graph().calls().is_empty());
    session.close();

    let mut session = GraphSession::open(&store).unwrap();
    {
        let mut importer = Importer::new(session.graph_mut(), ImportConfig::default());
        importer.import_directory(&src).unwrap();
    }
    assert_eq!(session.graph().node_count(), 4);
    assert_eq!(session.graph().calls().len(), 1);
    session.commit().unwrap();
}

#[test]
fn test_delete_project_keeps_other_projects() {
    let tree = TempDir::new().unwrap();
    write_tree(
        tree.path(),
        &[
            ("one/main.py", "import os\n\ndef one():\n    pass\n"),
            ("two/main.py", "import os\nimport sys\n\ndef two():\n    pass\n"),
        ],
    );
    let store = tree.path().join("graph.json");

    let mut session = GraphSession::open(&store).unwrap();
    for project in ["one", "two"] {
        let mut importer = Importer::new(session.graph_mut(), ImportConfig::default());
        importer.set_project(project).unwrap();
        importer.import_directory(&tree.path().join(project)).unwrap();
    }

    let graph = session.graph_mut();
    graph.delete_project("one").unwrap();

    assert_eq!(graph.list_projects().unwrap(), vec!["two"]);
    assert!(graph.project_code("one").unwrap().is_none());
    let two = fs::canonicalize(tree.path().join("two/main.py")).unwrap();
    assert_eq!(graph.packages_of_file(&two), vec!["os", "sys"]);
    assert_eq!(graph.functions_in_file(&two), vec!["two"]);
    session.commit().unwrap();
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = codeweb(dir.path(), &["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("codeweb"));
    assert!(text.contains("import"));
}

#[test]
fn test_cli_import_and_query() {
    let tree = demo_tree();
    let cwd = tree.path();
    let store: PathBuf = cwd.join("graph.json");
    let store_arg = store.to_str().unwrap();

    let output = codeweb(
        cwd,
        &["--store", store_arg, "import", "src", "--project", "demo", "--json"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["imported"], 2);
    assert_eq!(report["link"]["linked"], 1);
    assert!(store.exists());

    let output = codeweb(cwd, &["--store", store_arg, "projects"]);
    assert_eq!(stdout(&output).trim(), "demo");

    let output = codeweb(cwd, &["--store", store_arg, "code", "demo"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("return helper()"));

    let output = codeweb(cwd, &["--store", store_arg, "stats"]);
    let text = stdout(&output);
    assert!(text.contains("Calls"));
    assert!(text.starts_with("5 nodes"));

    let output = codeweb(cwd, &["--store", store_arg, "code", "missing"]);
    assert!(!output.status.success());

    let output = codeweb(cwd, &["--store", store_arg, "delete", "demo"]);
    assert!(output.status.success());
    let output = codeweb(cwd, &["--store", store_arg, "projects"]);
    assert!(stdout(&output).trim().is_empty());

    let output = codeweb(cwd, &["--store", store_arg, "clear"]);
    assert!(output.status.success());
    assert!(!store.exists());
}

#[test]
fn test_cli_reads_config_file() {
    let tree = demo_tree();
    let cwd = tree.path();
    write_tree(
        cwd,
        &[
            (
                "codeweb.toml",
                "store_path = \"custom/graph.json\"\nproject = \"configured\"\nsupported_only = true\n",
            ),
            ("src/notes.txt", "not code\n"),
        ],
    );

    let output = codeweb(cwd, &["import", "src", "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["imported"], 2);
    assert!(cwd.join("custom/graph.json").exists());

    let output = codeweb(cwd, &["projects"]);
    assert_eq!(stdout(&output).trim(), "configured");
}

#[test]
fn test_cli_single_file_import() {
    let tree = demo_tree();
    let cwd = tree.path();

    let output = codeweb(cwd, &["--store", "g.json", "import", "src/b.py", "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["imported"], 1);
    assert_eq!(report["link"]["files"], 0);
    assert_eq!(report["link"]["linked"], 0);

    let output = codeweb(cwd, &["--store", "g.json", "import", "src/missing.py"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_single_file_reimport_keeps_calls() {
    let tree = demo_tree();
    let cwd = tree.path();
    let store = cwd.join("g.json");

    let output = codeweb(cwd, &["--store", "g.json", "import", "src"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let session = GraphSession::open(&store).unwrap();
    let calls = session.graph().calls();
    session.close();
    assert_eq!(calls.len(), 1);

    let output = codeweb(cwd, &["--store", "g.json", "import", "src/b.py"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let session = GraphSession::open(&store).unwrap();
    assert_eq!(session.graph().calls(), calls);
    assert_eq!(session.graph().node_count(), 4);
    session.close();
}

#[test]
fn test_cli_clear_removes_corrupt_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("g.json");
    fs::write(&store, "{not json").unwrap();

    let output = codeweb(dir.path(), &["--store", "g.json", "projects"]);
    assert!(!output.status.success());

    let output = codeweb(dir.path(), &["--store", "g.json", "clear"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(!store.exists());

    let output = codeweb(dir.path(), &["--store", "g.json", "clear"]);
    assert!(output.status.success());
}
