use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn nota_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nota"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    nota_cmd().current_dir(dir).args(args).output().unwrap()
}

fn run_with_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = nota_cmd()
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Create a note and return its id.
fn create(dir: &Path, args: &[&str]) -> String {
    let mut full = vec!["new", "--json"];
    full.extend_from_slice(args);
    let output = run(dir, &full);
    assert!(output.status.success(), "{}", stderr(&output));
    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    note["id"].as_str().unwrap().to_string()
}

fn list_json(dir: &Path, args: &[&str]) -> Vec<serde_json::Value> {
    let mut full = vec!["list", "--json"];
    full.extend_from_slice(args);
    let output = run(dir, &full);
    assert!(output.status.success(), "{}", stderr(&output));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_list_empty_directory() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["list"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("No notes found."));
    assert!(!tmp.path().join(".nota").exists());
}

#[test]
fn test_new_creates_notes_file() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["new"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("無題のノート"));
    let raw = fs::read_to_string(tmp.path().join(".nota/notes.json")).unwrap();
    let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["title"], "");
    assert_eq!(stored[0]["body"], "");
    assert!(stored[0]["updatedAt"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_full_note_workflow() {
    let tmp = TempDir::new().unwrap();

    let groceries = create(tmp.path(), &[]);
    let output = run(
        tmp.path(),
        &["edit", &groceries, "--title", "Groceries", "--body", "milk, eggs"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Groceries"));

    let newer = create(tmp.path(), &[]);
    assert_ne!(newer, groceries);

    // Newest first, placeholder for the empty one.
    let list = list_json(tmp.path(), &[]);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], newer.as_str());
    assert_eq!(list[0]["title"], "無題のノート");
    assert_eq!(list[0]["active"], true);
    assert_eq!(list[1]["title"], "Groceries");

    let hits = list_json(tmp.path(), &["--search", "MILK"]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], groceries.as_str());

    let output = run(tmp.path(), &["delete", &groceries, "--force"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Deleted note"));

    let list = list_json(tmp.path(), &[]);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], newer.as_str());
    assert_eq!(list[0]["active"], true);
}

#[test]
fn test_new_with_title_and_body() {
    let tmp = TempDir::new().unwrap();

    let id = create(tmp.path(), &["--title", "Standup", "--body", "ship it"]);

    let output = run(tmp.path(), &["show", &id]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Standup"));
    assert!(out.contains("ship it"));
}

#[test]
fn test_new_reads_body_from_stdin() {
    let tmp = TempDir::new().unwrap();

    let output = run_with_stdin(tmp.path(), &["new", "--stdin", "--json"], "line one\nline two");
    assert!(output.status.success(), "{}", stderr(&output));
    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(note["body"], "line one\nline two");
    assert_eq!(note["title"], "");
}

#[test]
fn test_edit_keeps_unspecified_fields() {
    let tmp = TempDir::new().unwrap();
    let id = create(tmp.path(), &["--title", "Keep", "--body", "old body"]);

    let output = run(tmp.path(), &["edit", &id, "--body", "new body", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let editor: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(editor["title"], "Keep");
    assert_eq!(editor["body"], "new body");
}

#[test]
fn test_edit_without_changes() {
    let tmp = TempDir::new().unwrap();
    let id = create(tmp.path(), &[]);

    let output = run(tmp.path(), &["edit", &id]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Nothing to update."));
}

#[test]
fn test_unknown_id_is_reported() {
    let tmp = TempDir::new().unwrap();
    create(tmp.path(), &[]);

    for args in [
        vec!["show", "123"],
        vec!["edit", "123", "--title", "x"],
        vec!["delete", "123", "--force"],
    ] {
        let output = run(tmp.path(), &args);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("Note not found: 123"));
    }
}

#[test]
fn test_delete_requires_force_when_not_interactive() {
    let tmp = TempDir::new().unwrap();
    let id = create(tmp.path(), &[]);

    let output = run(tmp.path(), &["delete", &id]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));
    assert_eq!(list_json(tmp.path(), &[]).len(), 1);
}

#[test]
fn test_corrupted_storage_starts_empty() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".nota")).unwrap();
    fs::write(tmp.path().join(".nota/notes.json"), "{definitely not json").unwrap();

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No notes found."));

    create(tmp.path(), &["--title", "fresh"]);
    let list = list_json(tmp.path(), &[]);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "fresh");
}

#[test]
fn test_unreadable_storage_is_an_error() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".nota/notes.json")).unwrap();

    let output = run(tmp.path(), &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: IO error"));

    let output = run(tmp.path(), &["new"]);
    assert!(!output.status.success());
    assert!(tmp.path().join(".nota/notes.json").is_dir());
}

#[test]
fn test_reads_browser_written_notes() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".nota")).unwrap();
    fs::write(
        tmp.path().join(".nota/config.json"),
        r#"{"display":{"utc_offset_minutes":540}}"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join(".nota/notes.json"),
        r#"[{"id":"1759709100000","title":"","body":"x","updatedAt":"2025-10-06T00:05:00.000Z"}]"#,
    )
    .unwrap();

    let list = list_json(tmp.path(), &[]);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "1759709100000");
    assert_eq!(list[0]["title"], "無題のノート");
    assert_eq!(list[0]["date"], "2025/10/6");

    let output = run(tmp.path(), &["show", "1759709100000", "--json"]);
    let editor: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(editor["updated"], "2025/10/06 09:05");
}

#[test]
fn test_custom_storage_key() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".nota")).unwrap();
    fs::write(
        tmp.path().join(".nota/config.json"),
        r#"{"storage_key":"work"}"#,
    )
    .unwrap();

    create(tmp.path(), &["--title", "work item"]);

    assert!(tmp.path().join(".nota/work.json").exists());
    assert!(!tmp.path().join(".nota/notes.json").exists());
}

#[test]
fn test_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".nota")).unwrap();
    fs::write(tmp.path().join(".nota/config.json"), "{nope").unwrap();

    let output = run(tmp.path(), &["list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Config error"));
}

#[test]
fn test_finds_data_dir_in_parent() {
    let tmp = TempDir::new().unwrap();
    create(tmp.path(), &["--title", "top level"]);
    let nested = tmp.path().join("a/b");
    fs::create_dir_all(&nested).unwrap();

    let list = list_json(&nested, &[]);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "top level");
    assert!(!nested.join(".nota").exists());
}

#[test]
fn test_greet() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["greet"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(
        out.contains("おはよう") || out.contains("こんにちは") || out.contains("こんばんは"),
        "unexpected greeting: {}",
        out
    );
}
