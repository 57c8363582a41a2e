//! Integration tests for notion-graph
//!
//! These drive the built binary end to end against saved query responses.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;

fn page(id: &str, title: &str, children: &[&str]) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Name": { "id": "title", "type": "title", "title": [
                { "type": "text", "text": { "content": title }, "plain_text": title }
            ]},
            "Children": { "id": "rel", "type": "relation", "relation":
                children.iter().map(|c| json!({ "id": c })).collect::<Vec<_>>()
            }
        }
    })
}

fn save_response(dir: &Path, results: Vec<Value>) -> std::path::PathBuf {
    let path = dir.join("response.json");
    let body = json!({ "object": "list", "results": results, "has_more": false });
    std::fs::write(&path, body.to_string()).unwrap();
    path
}

fn notion_graph(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_notion-graph"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute notion-graph")
}

/// Test that the CLI describes itself
#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = notion_graph(&["--help"], dir.path());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Notion database"));
    assert!(stdout.contains("<DATABASE_ID>"));
}

/// Test the two-note example end to end
#[test]
fn test_renders_saved_response() {
    let dir = TempDir::new().unwrap();
    let response = save_response(
        dir.path(),
        vec![page("A", "Intro", &["B"]), page("B", "Details", &[])],
    );
    let out = dir.path().join("graph.html");

    let output = notion_graph(
        &["-", "-", out.to_str().unwrap(), "--from-file", response.to_str().unwrap()],
        dir.path(),
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("results in"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#""label":"Intro""#));
    assert!(html.contains(r#""label":"Details""#));
    assert!(html.contains(r#""edges":[{"from":0,"to":1}]"#));
}

/// Test that an empty database still yields a page
#[test]
fn test_empty_database() {
    let dir = TempDir::new().unwrap();
    let response = save_response(dir.path(), vec![]);
    let out = dir.path().join("empty.html");

    let output = notion_graph(
        &["-", "-", out.to_str().unwrap(), "--from-file", response.to_str().unwrap()],
        dir.path(),
    );

    assert!(output.status.success());
    assert!(std::fs::read_to_string(&out).unwrap().contains(r#"{"nodes":[],"edges":[]}"#));
}

/// Test that a dangling relation fails the run without output
#[test]
fn test_unknown_child_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let response = save_response(dir.path(), vec![page("A", "Intro", &["missing"])]);
    let out = dir.path().join("graph.html");

    let output = notion_graph(
        &["-", "-", out.to_str().unwrap(), "--from-file", response.to_str().unwrap()],
        dir.path(),
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("unknown child id `missing`"));
    assert!(stderr.contains("Usage: notion-graph"));
    assert!(!out.exists());
}

/// Test that an unreachable API fails the run without output
#[test]
fn test_network_failure_fails_without_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("notion-graph.toml"),
        "[notion]\nbase_url = \"http://127.0.0.1:1\"\ntimeout_secs = 5\n",
    )
    .unwrap();
    let out = dir.path().join("graph.html");

    let output = notion_graph(&["secret_x", "db123", out.to_str().unwrap()], dir.path());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Failed to fetch records"));
    assert!(!out.exists());
}

/// Test config-driven property names and layout passthrough
#[test]
fn test_custom_properties_and_layout() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("notion-graph.toml"),
        concat!(
            "[notion]\n",
            "title_property = \"Title\"\n",
            "children_property = \"Links\"\n\n",
            "[render]\n",
            "heading = \"Zettelkasten\"\n",
        ),
    )
    .unwrap();
    let raw = json!([
        { "id": "A", "properties": {
            "Title": { "title": [{ "plain_text": "Root" }] },
            "Links": { "relation": [{ "id": "B" }] } } },
        { "id": "B", "properties": {
            "Title": { "title": [{ "plain_text": "Leaf" }] },
            "Links": { "relation": [] } } }
    ]);
    let response = dir.path().join("bare.json");
    std::fs::write(&response, raw.to_string()).unwrap();
    let out = dir.path().join("graph.html");

    let output = notion_graph(
        &[
            "-",
            "-",
            out.to_str().unwrap(),
            "--from-file",
            response.to_str().unwrap(),
            "--layout",
            "spring_length=222",
            "--layout",
            "maxVelocity=12",
        ],
        dir.path(),
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("<h1>Zettelkasten</h1>"));
    assert!(html.contains(r#""label":"Root""#));
    assert!(html.contains(r#""springLength":222.0"#));
    assert!(html.contains(r#""maxVelocity":12"#));
}

/// Test that argument errors share the failure path of every other error
#[test]
fn test_missing_output_argument_exits_one_with_usage() {
    let dir = TempDir::new().unwrap();
    let output = notion_graph(&["secret_x", "db123"], dir.path());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("<OUTPUT>"));
    assert!(stderr.contains("Usage: notion-graph <TOKEN> <DATABASE_ID> <OUTPUT>"));
    assert!(stderr.contains("NOTION_TOKEN"));
}

/// Test that a malformed .env is reported but does not stop the run
#[test]
fn test_malformed_dotenv_warns() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "NOTION_TOKEN secret_without_equals\n").unwrap();
    let response = save_response(dir.path(), vec![page("A", "Intro", &[])]);
    let out = dir.path().join("graph.html");

    let output = notion_graph(
        &["-", "-", out.to_str().unwrap(), "--from-file", response.to_str().unwrap()],
        dir.path(),
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Ignoring malformed .env file"));
    assert!(out.exists());
}

/// Test that --cdn swaps the embedded bundle for the unpkg script tag
#[test]
fn test_cdn_flag_links_vis_network() {
    let dir = TempDir::new().unwrap();
    let response = save_response(dir.path(), vec![page("A", "Intro", &[])]);
    let out = dir.path().join("graph.html");

    let output = notion_graph(
        &["-", "-", out.to_str().unwrap(), "--from-file", response.to_str().unwrap(), "--cdn"],
        dir.path(),
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"src="https://unpkg.com/vis-network@"#));
}

/// Test that a note without relations still gets a node by default
#[test]
fn test_isolated_note_is_drawn() {
    let dir = TempDir::new().unwrap();
    let response = save_response(
        dir.path(),
        vec![page("A", "Intro", &["B"]), page("B", "Details", &[]), page("C", "Orphan", &[])],
    );
    let out = dir.path().join("graph.html");

    let output = notion_graph(
        &["-", "-", out.to_str().unwrap(), "--from-file", response.to_str().unwrap()],
        dir.path(),
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(std::fs::read_to_string(&out).unwrap().contains(r#""label":"Orphan""#));
}
