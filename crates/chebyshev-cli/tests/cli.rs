//! Binary-level tests for `chebyshev`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn chebyshev() -> Command {
    let mut cmd = Command::cargo_bin("chebyshev").unwrap();
    cmd.env_remove("CHEBYSHEV_CONFIG").env("RUST_LOG", "warn");
    cmd
}

fn spike_stream() -> String {
    let mut lines: Vec<String> = (0..40)
        .map(|i| {
            format!(
                r#"{{"timestamp": "2014-02-14 14:{:02}:00", "value": "{}"}}"#,
                i,
                20 + i % 3
            )
        })
        .collect();
    lines.push(r#"{"timestamp": "2014-02-14 14:40:00", "value": 950}"#.to_string());
    lines.join("\n") + "\n"
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn scores_stdin_as_jsonl() {
    let output = chebyshev()
        .arg("score")
        .write_stdin(spike_stream())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let scores: Vec<f64> = stdout
        .lines()
        .map(|l| {
            let v: serde_json::Value = serde_json::from_str(l).unwrap();
            v["anomaly_score"].as_f64().unwrap()
        })
        .collect();

    assert_eq!(scores.len(), 41);
    assert!(scores[..40].iter().all(|&s| s == 0.0));
    assert!(scores[40] > 0.9);
}

#[test]
fn scores_file_input_with_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(&dir, "input.jsonl", &spike_stream());
    chebyshev()
        .args(["score", "--summary", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("\"records\":41"))
        .stderr(predicate::str::contains("\"anomalies\":1"));
}

#[test]
fn json_output_is_an_array() {
    let output = chebyshev()
        .args(["--output", "json", "score"])
        .write_stdin(spike_stream())
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(41));
}

#[test]
fn malformed_record_fails_with_line_number() {
    chebyshev()
        .arg("score")
        .write_stdin("{\"value\": 1}\n{\"value\": 2}\n{\"value\": \"n/a\"}\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn invalid_probability_is_rejected() {
    chebyshev()
        .args(["--stage2-probability", "0", "score"])
        .write_stdin("{\"value\": 1}\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("stage2"));
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_file(
        &dir,
        "config.toml",
        "stage1_probability = 0.2\nstage2_probability = 0.01\n",
    );
    chebyshev()
        .arg("--config")
        .arg(&cfg)
        .args(["--stage2-probability", "0.25", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stage1_probability = 0.2"))
        .stdout(predicate::str::contains("stage2_probability = 0.25"))
        .stdout(predicate::str::contains("# k2 = 2"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    chebyshev()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("config")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn division_by_zero_score_is_written_as_inf() {
    let mut input: String = (0..20).map(|_| "{\"value\": 0.0}\n").collect();
    input.push_str("{\"value\": -1.0}\n");

    let output = chebyshev().arg("score").write_stdin(input).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let last: chebyshev_detector::ScoredRecord =
        serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(last.value, -1.0);
    assert_eq!(last.anomaly_score, f64::INFINITY);
    assert!(stdout.ends_with("\"anomaly_score\":\"inf\"}\n"));
}
