//! End-to-end tests for the `kiln` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "NODE_ENV",
    "KILN_PRODUCTION",
    "KILN_DEBUG",
    "KILN_FAST",
    "KILN_ANALYZE",
    "KILN_HOST",
];

fn kiln() -> Command {
    let mut cmd = Command::cargo_bin("kiln").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/app")).unwrap();
    fs::create_dir_all(root.join("config")).unwrap();
    fs::write(root.join("src/index.ts"), "export {};\n").unwrap();
    fs::write(root.join("config/alias.json"), r#"{ "@app": "src/app" }"#).unwrap();
    temp
}

fn root_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn inspect_prints_development_config() {
    let temp = project();

    kiln()
        .args(["inspect", "--root", root_arg(temp.path())])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"@app\""))
        .stdout(predicate::str::contains("\"mode\": \"development\""))
        .stdout(predicate::str::contains("\"devtool\": \"eval\""))
        .stdout(predicate::str::contains("bundle-analyzer").not());
}

#[test]
fn inspect_production_flag_adds_minifier() {
    let temp = project();

    kiln()
        .args(["inspect", "--production", "--root", root_arg(temp.path())])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"production\""))
        .stdout(predicate::str::contains("\"minifier\""))
        .stdout(predicate::str::contains("\"devtool\": false"));
}

#[test]
fn inspect_reads_environment() {
    let temp = project();

    kiln()
        .env("KILN_ANALYZE", "true")
        .env("KILN_HOST", "0.0.0.0")
        .args(["inspect", "--root", root_arg(temp.path())])
        .assert()
        .success()
        .stdout(predicate::str::contains("bundle-analyzer"))
        .stdout(predicate::str::contains("http://0.0.0.0:8081/"));
}

#[test]
fn inspect_writes_out_file() {
    let temp = project();
    let out = temp.path().join("build.json");

    kiln()
        .args(["inspect", "--root", root_arg(temp.path()), "--out"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote configuration"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["mode"], "development");
    assert!(written["resolve"]["alias"]["@app"]
        .as_str()
        .unwrap()
        .ends_with("app"));
}

#[test]
fn inspect_fails_without_alias_file() {
    let temp = project();
    fs::remove_file(temp.path().join("config/alias.json")).unwrap();

    kiln()
        .args(["inspect", "--root", root_arg(temp.path())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Alias file not found"));
}

#[test]
fn check_accepts_valid_project() {
    let temp = project();

    kiln()
        .args(["check", "--root", root_arg(temp.path())])
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration is valid"));
}

#[test]
fn check_reports_missing_alias_target() {
    let temp = project();
    fs::write(
        temp.path().join("config/alias.json"),
        r#"{ "@missing": "src/nowhere" }"#,
    )
    .unwrap();

    kiln()
        .args(["check", "--root", root_arg(temp.path())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("@missing"));
}

#[test]
fn check_rejects_clashing_ports() {
    let temp = project();
    fs::write(
        temp.path().join("kiln.toml"),
        "[ports]\nproxy = 9000\ndev_server = 9000\n",
    )
    .unwrap();

    kiln()
        .args(["check", "--root", root_arg(temp.path())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("9000"));
}
