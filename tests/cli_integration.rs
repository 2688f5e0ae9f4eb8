// CLI integration tests for check/show flows.
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_deployconf");
    Command::new(exe)
}

fn parse_json(value: &[u8]) -> Value {
    serde_json::from_slice(value).expect("valid json")
}

fn write_definition(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).expect("write definition");
    path.to_str().expect("utf8 path").to_string()
}

#[test]
fn check_accepts_escaped_and_native_deployments() {
    let temp = tempfile::tempdir().expect("tempdir");
    let escaped = write_definition(
        temp.path(),
        "escaped.json",
        r#"{"label": "web", "deployment": "{\"services\":{\"web\":{\"image\":\"nginx:1.25\"}}}"}"#,
    );
    let native = write_definition(
        temp.path(),
        "native.json",
        r#"{"label": "web", "deployment": {"services": {"web": {"image": "nginx:1.25"}}}}"#,
    );

    for path in [escaped, native] {
        let output = cmd().args(["check", &path]).output().expect("check");
        assert!(output.status.success(), "{path}");
        let report = parse_json(&output.stdout);
        assert_eq!(report["configured"], true);
        assert_eq!(report["status"], "ok");
        assert_eq!(report["summary"], "service(s) web");
    }
}

#[test]
fn check_reports_missing_image_with_validation_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_definition(
        temp.path(),
        "svc.json",
        r#"{"deployment": {"services": {"svc1": {"image": ""}}}}"#,
    );

    let output = cmd().args(["check", &path]).output().expect("check");
    assert_eq!(output.status.code(), Some(4));
    let report = parse_json(&output.stdout);
    assert_eq!(report["status"], "incomplete");
    assert_eq!(report["issues"][0]["service"], "svc1");
    assert_eq!(report["issues"][0]["code"], "missing-image");
}

#[test]
fn check_without_deployment_is_ok() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_definition(temp.path(), "bare.json", r#"{"label": "web", "deployment": ""}"#);

    let output = cmd().args(["check", &path]).output().expect("check");
    assert!(output.status.success());
    let report = parse_json(&output.stdout);
    assert_eq!(report["configured"], false);
    assert_eq!(report["summary"], Value::Null);
}

#[test]
fn malformed_deployment_emits_conversion_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_definition(
        temp.path(),
        "broken.json",
        r#"{"deployment": "{\"services\": {"}"#,
    );

    let output = cmd().args(["check", &path]).output().expect("check");
    assert_eq!(output.status.code(), Some(3));
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "Conversion");
    assert_eq!(err["error"]["input"], "{\"services\": {");
    assert!(err["error"]["causes"].as_array().is_some_and(|c| !c.is_empty()));
}

#[test]
fn show_renders_summary_full_and_json_forms() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_definition(
        temp.path(),
        "pair.json",
        r#"{"deployment": {"services": {"web": {"image": "nginx"}, "db": {"image": "postgres:16"}}}}"#,
    );

    let summary = cmd().args(["show", "--summary", &path]).output().expect("summary");
    assert!(summary.status.success());
    assert_eq!(String::from_utf8_lossy(&summary.stdout).trim_end(), "service(s) db, web");

    let full = cmd().args(["show", &path]).output().expect("full");
    assert!(full.status.success());
    assert_eq!(
        String::from_utf8_lossy(&full.stdout).trim_end(),
        r#"service: db, config: {"image":"postgres:16"}service: web, config: {"image":"nginx"}"#
    );

    let canonical = cmd().args(["show", "--json", &path]).output().expect("json");
    assert!(canonical.status.success());
    let value = parse_json(&canonical.stdout);
    assert_eq!(value["services"]["db"]["image"], "postgres:16");
}

#[test]
fn raw_stdin_is_read_as_deployment_field() {
    let mut child = cmd()
        .args(["show", "--summary", "--raw"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(br#"{"services": {"web": {"image": "nginx"}}}"#)
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "service(s) web");
}

#[test]
fn unknown_flag_is_usage_error() {
    let output = cmd().args(["check", "--bogus"]).output().expect("check");
    assert_eq!(output.status.code(), Some(2));
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "Usage");
}
