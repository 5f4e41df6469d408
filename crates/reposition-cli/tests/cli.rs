// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::{Command, Output};

fn write_input(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("reposition-{}-{}.json", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn run(path: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_reposition"))
        .arg(path)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

/// The JSON error object among the stderr lines.
fn stderr_error(output: &Output) -> Option<Value> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .find(|v| v.get("error").is_some())
}

#[test]
fn malformed_input_fails_with_json_error() {
    let path = write_input("malformed", r#"{"ports": [{"name": "A"}]"#);
    let output = run(&path);
    let _ = std::fs::remove_file(&path);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        stderr_error(&output),
        Some(json!({"error": "Failed to load input data"}))
    );
}

#[test]
fn entry_missing_a_field_fails_the_load() {
    let path = write_input(
        "missing-field",
        r#"{"containers": [{"id": "c1", "type": "20GP", "current_port": "A"}]}"#,
    );
    let output = run(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr_error(&output),
        Some(json!({"error": "Failed to load input data"}))
    );
}

#[test]
fn missing_file_fails_with_json_error() {
    let path = std::env::temp_dir().join("reposition-does-not-exist.json");
    let output = run(&path);

    assert!(!output.status.success());
    assert!(stderr_error(&output).is_some());
}

#[test]
fn empty_routing_batch_succeeds() {
    let path = write_input("routing", r#"{"optimization_type": "routing"}"#);
    let output = run(&path);
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result, json!({"total_distance": 0, "routes": [[]]}));
}

#[test]
fn unknown_type_is_reported_on_stdout() {
    let path = write_input("unknown", r#"{"optimization_type": "teleport"}"#);
    let output = run(&path);
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result, json!({"error": "Unknown optimization type: teleport"}));
}
