//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use similar_asserts::assert_eq;
use std::fs;
use tempfile::TempDir;

const MONOREPO_JSONL: &str = r#"{"path":"extension/package.json","localPath":"/repo/packages/ext/package.json"}
{"path":"extension/../../README.md","localPath":"/repo/README.md"}
{"path":"extension/../../node_modules/foo/x.js","localPath":"/repo/node_modules/foo/x.js"}
{"path":"extension/../other-pkg/package.json","localPath":"/repo/packages/other-pkg/package.json"}
{"path":"extension/../other-pkg/node_modules/foo/node_modules/bar/x.js","localPath":"/repo/packages/other-pkg/node_modules/foo/node_modules/bar/x.js"}
{"path":"extension/node_modules/baz/index.js","localPath":"/repo/packages/ext/node_modules/baz/index.js"}
"#;

fn depmerge() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("depmerge"));
    cmd.env_remove("DEPMERGE_ROOT_FOLDER").env_remove("DEPMERGE_DEPS_DIR");
    cmd
}

fn paths_of_jsonl(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| {
            let value: Value = serde_json::from_str(line).expect("jsonl line");
            value["path"].as_str().expect("path").to_string()
        })
        .collect()
}

#[test]
fn test_cli_version() {
    let mut cmd = depmerge();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("depmerge"));
}

#[test]
fn test_cli_help() {
    let mut cmd = depmerge();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("node_modules"))
        .stdout(predicate::str::contains("normalize"))
        .stdout(predicate::str::contains("explain"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_normalize_jsonl_from_stdin() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path()).arg("normalize").write_stdin(MONOREPO_JSONL);
    let output = cmd.assert().success().get_output().clone();

    assert_eq!(
        paths_of_jsonl(&output.stdout),
        vec![
            "extension/package.json",
            "extension/node_modules/foo/x.js",
            "extension/node_modules/foo/node_modules/bar/x.js",
            "extension/node_modules/baz/index.js",
        ]
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("6 records: 4 kept (2 relocated), 2 dropped"), "{stderr}");
}

#[test]
fn test_normalize_preserves_opaque_fields() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path()).arg("normalize").write_stdin(MONOREPO_JSONL);
    let output = cmd.assert().success().get_output().clone();

    let first_relocated: Value = serde_json::from_str(
        String::from_utf8_lossy(&output.stdout).lines().nth(1).expect("second line"),
    )
    .expect("json");
    assert_eq!(first_relocated["localPath"], "/repo/node_modules/foo/x.js");
}

#[test]
fn test_normalize_json_file_to_output_file_with_report() {
    let tmp = TempDir::new().expect("tmp");
    let input = tmp.path().join("files.json");
    fs::write(
        &input,
        r#"[
  {"path": "extension/index.js", "size": 1},
  {"path": "extension/../other-pkg/src/main.ts", "size": 2},
  {"path": "extension/../other-pkg/node_modules/foo/x.js", "size": 3}
]"#,
    )
    .expect("write input");
    let output = tmp.path().join("out").join("merged.json");
    let report = tmp.path().join("report.json");

    let mut cmd = depmerge();
    cmd.current_dir(tmp.path()).args([
        "normalize",
        input.to_str().expect("utf8"),
        "--output",
        output.to_str().expect("utf8"),
        "--report",
        report.to_str().expect("utf8"),
        "--no-timestamp",
    ]);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let merged: Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read output")).expect("json");
    assert_eq!(
        merged,
        serde_json::json!([
            {"path": "extension/index.js", "size": 1},
            {"path": "extension/node_modules/foo/x.js", "size": 3}
        ])
    );

    let report: Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("read report")).expect("json");
    assert_eq!(report["stats"]["dropped"], 1);
    assert_eq!(report["stats"]["relocated"], 1);
    assert!(report.get("generated_at").is_none());
}

#[test]
fn test_normalize_format_override() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path())
        .args(["normalize", "--format", "json"])
        .write_stdin("{\"path\":\"extension/../a/node_modules/b.js\"}\n");
    let output = cmd.assert().success().get_output().clone();

    let merged: Value = serde_json::from_slice(&output.stdout).expect("json array");
    assert_eq!(merged, serde_json::json!([{"path": "extension/node_modules/b.js"}]));
}

#[test]
fn test_normalize_parallel_matches_sequential() {
    let tmp = TempDir::new().expect("tmp");

    let mut seq = depmerge();
    seq.current_dir(tmp.path()).arg("normalize").write_stdin(MONOREPO_JSONL);
    let seq_out = seq.assert().success().get_output().stdout.clone();

    let mut par = depmerge();
    par.current_dir(tmp.path()).args(["normalize", "--parallel"]).write_stdin(MONOREPO_JSONL);
    let par_out = par.assert().success().get_output().stdout.clone();

    assert_eq!(String::from_utf8_lossy(&seq_out), String::from_utf8_lossy(&par_out));
}

#[test]
fn test_normalize_uses_discovered_config() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("depmerge.toml"), "root_folder = 'app'\ndeps_dir = 'vendor'\n")
        .expect("write config");

    let mut cmd = depmerge();
    cmd.current_dir(tmp.path())
        .arg("normalize")
        .write_stdin("{\"path\":\"app/../lib/vendor/x.rb\"}\n{\"path\":\"app/../lib/Gemfile\"}\n");
    let output = cmd.assert().success().get_output().clone();
    assert_eq!(paths_of_jsonl(&output.stdout), vec!["app/vendor/x.rb"]);
}

#[test]
fn test_cli_flag_overrides_env() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path())
        .env("DEPMERGE_ROOT_FOLDER", "from-env")
        .args(["normalize", "--root-folder", "pkg"])
        .write_stdin("{\"path\":\"pkg/../x/node_modules/a.js\"}\n");
    let output = cmd.assert().success().get_output().clone();
    assert_eq!(paths_of_jsonl(&output.stdout), vec!["pkg/node_modules/a.js"]);
}

#[test]
fn test_env_sets_root_folder() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path())
        .env("DEPMERGE_ROOT_FOLDER", "pkg")
        .arg("normalize")
        .write_stdin("{\"path\":\"pkg/../x/README.md\"}\n{\"path\":\"pkg/a.js\"}\n");
    let output = cmd.assert().success().get_output().clone();
    assert_eq!(paths_of_jsonl(&output.stdout), vec!["pkg/a.js"]);
}

#[test]
fn test_normalize_rejects_invalid_root_folder() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path()).args(["normalize", "--root-folder", "a/b"]).write_stdin("");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("root_folder must be a single folder name"));
}

#[test]
fn test_normalize_reports_bad_record() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path())
        .arg("normalize")
        .write_stdin("{\"path\":\"a\"}\n{\"name\":\"no path\"}\n");
    cmd.assert().failure().stderr(predicate::str::contains("record 1 has no \"path\" field"));
}

#[test]
fn test_normalize_missing_input_file() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path()).args(["normalize", "does-not-exist.jsonl"]);
    cmd.assert().failure().stderr(predicate::str::contains("Failed reading records"));
}

#[test]
fn test_explain_prints_rules() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path()).args([
        "explain",
        "extension/index.js",
        "extension/../other-pkg/node_modules/foo/x.js",
        "extension/../../README.md",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("root-file"))
        .stdout(predicate::str::contains(
            "extension/../other-pkg/node_modules/foo/x.js -> extension/node_modules/foo/x.js",
        ))
        .stdout(predicate::str::contains("extension/../../README.md (dropped)"))
        .stdout(predicate::str::contains("1 of 3 paths would be dropped"));
}

#[test]
fn test_explain_requires_paths() {
    let mut cmd = depmerge();
    cmd.arg("explain");
    cmd.assert().failure();
}

#[test]
fn test_completions_bash() {
    let mut cmd = depmerge();
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("depmerge"));
}

#[test]
fn test_normalize_rejects_root_folder_containing_deps_dir() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path())
        .args(["normalize", "--root-folder", "libs-app", "--deps-dir", "libs"])
        .write_stdin("{\"path\":\"libs-app/../../README.md\"}\n");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("root_folder 'libs-app' must not contain deps_dir 'libs'"));
}

#[test]
fn test_normalize_separators_flag() {
    let tmp = TempDir::new().expect("tmp");
    let input = concat!(
        r#"{"path":"extension\\..\\other\\node_modules\\a\\b.js"}"#,
        "\n",
        r#"{"path":"extension\\..\\other\\README.md"}"#,
        "\n",
    );

    let mut plain = depmerge();
    plain.current_dir(tmp.path()).arg("normalize").write_stdin(input);
    let output = plain.assert().success().get_output().clone();
    assert_eq!(
        paths_of_jsonl(&output.stdout),
        vec!["extension\\..\\other\\node_modules\\a\\b.js", "extension\\..\\other\\README.md"]
    );

    let mut fixed = depmerge();
    fixed.current_dir(tmp.path()).args(["normalize", "--normalize-separators"]).write_stdin(input);
    let output = fixed.assert().success().get_output().clone();
    assert_eq!(paths_of_jsonl(&output.stdout), vec!["extension/node_modules/a/b.js"]);
}

#[test]
fn test_normalize_dash_reads_stdin() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path()).args(["normalize", "-"]).write_stdin(MONOREPO_JSONL);
    let output = cmd.assert().success().get_output().clone();
    assert_eq!(paths_of_jsonl(&output.stdout).len(), 4);
}

#[test]
fn test_normalize_keeps_field_order() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = depmerge();
    cmd.current_dir(tmp.path())
        .arg("normalize")
        .write_stdin("{\"zeta\":1,\"path\":\"extension/../p/node_modules/a.js\",\"alpha\":2}\n");
    cmd.assert().success().stdout(predicate::str::diff(
        "{\"path\":\"extension/node_modules/a.js\",\"zeta\":1,\"alpha\":2}\n",
    ));
}
