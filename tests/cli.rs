use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn hungarian_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hungarian"))
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = hungarian_cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run hungarian");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for hungarian")
}

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}

#[test]
fn text_matrix_from_stdin() {
    let output = run_with_stdin(&["-"], "9 2 7\n6 4 3\n5 8 1\n");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, vec!["0 -> 1", "1 -> 0", "2 -> 2", "cost: 9"]);
}

#[test]
fn json_output_from_file() {
    let path = write_fixture("identity.json", "[[0, 5], [5, 0]]");
    let output = hungarian_cmd()
        .args(["--format", "json"])
        .arg(&path)
        .output()
        .expect("failed to run hungarian");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["cost"], 0.0);
    assert_eq!(report["assignment"][0]["row"], 0);
    assert_eq!(report["assignment"][0]["col"], 0);
    assert_eq!(report["assignment"][1]["col"], 1);
    assert!(report.get("steps").is_none());
}

#[test]
fn steps_are_emitted_on_request() {
    let output = run_with_stdin(&["--steps", "--format", "json", "-"], "1 2 3\n2 4 6\n3 6 9\n");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let steps = report["steps"].as_array().expect("steps array");
    assert_eq!(steps[0]["phase"], "row reduction");
    assert_eq!(steps.last().expect("non-empty")["phase"], "complete");
    assert!(steps.iter().any(|s| s["phase"] == "adjustment"));
    assert_eq!(report["cost"], 10.0);
}

#[test]
fn text_steps_show_the_reduced_matrix() {
    let output = run_with_stdin(&["--steps", "-"], "0 5\n5 0\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("step 1: row reduction"));
    assert!(stdout.contains("complete"));
}

#[test]
fn rectangular_input_is_padded_by_default() {
    let output = run_with_stdin(&["-"], "1 9\n9 9\n9 1\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 -> -"));
    assert!(stdout.contains("cost: 2"));
}

#[test]
fn rectangular_input_rejected_on_request() {
    let output = run_with_stdin(&["--reject-rectangular", "-"], "1 2 3\n4 5 6\n");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("rectangular"));
}

#[test]
fn malformed_input_exits_2() {
    let output = run_with_stdin(&["-"], "1 2\n3 oops\n");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2"));

    let output = run_with_stdin(&["-"], "1 2\n3\n");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn negative_costs() {
    let output = run_with_stdin(&["-"], "-5 2\n1 -1\n");
    assert_eq!(output.status.code(), Some(2));

    let output = run_with_stdin(&["--shift-negative", "-"], "-5 2\n1 -1\n");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("cost: -6"));
}

#[test]
fn size_limit_exits_3() {
    let output = run_with_stdin(&["--max-size", "2", "-"], "1 2 3\n4 5 6\n7 8 9\n");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn config_file_with_cli_override() {
    let config = write_fixture("strict.toml", "max_size = 2\nshape = \"reject\"\n");
    let config = config.to_str().expect("utf-8 path");

    let output = run_with_stdin(&["--config", config, "-"], "1 2\n3 4\n");
    assert!(output.status.success());

    let output = run_with_stdin(&["--config", config, "-"], "1 2 3\n");
    assert_eq!(output.status.code(), Some(2));

    let output = run_with_stdin(
        &["--config", config, "--max-size", "3", "-"],
        "1 2 3\n4 5 6\n7 8 9\n",
    );
    assert!(output.status.success());
}

#[test]
fn invalid_config_exits_2() {
    let config = write_fixture("bad.toml", "max_size = \"big\"\n");
    let config = config.to_str().expect("utf-8 path");
    let output = run_with_stdin(&["--config", config, "-"], "1\n");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_file_exits_1() {
    let output = hungarian_cmd()
        .arg("/nonexistent/matrix.txt")
        .output()
        .expect("failed to run hungarian");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn largest_finite_float_is_rejected() {
    let output = run_with_stdin(&["-"], "0 1.7976931348623157e308\n0 0\n");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("largest supported cost"));
}

#[test]
fn empty_matrix() {
    let output = run_with_stdin(&["-"], "");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "cost: 0");
}
