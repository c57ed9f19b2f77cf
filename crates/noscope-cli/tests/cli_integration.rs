//! Integration tests for the `noscope` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn noscope(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_noscope"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("NOSCOPE_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run noscope")
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// check
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_check_clean_manifest() {
    let output = noscope(&["check", &fixture("god_object.toml")]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("Checked 3 scopes: no issues found."));
}

#[test]
fn test_check_reports_errors() {
    let output = noscope(&["check", &fixture("broken.toml")]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("NS0001"));
    assert!(stderr.contains("Member 'Ghost' not found on target type 'GodObject'"));
    assert!(stderr.contains("NS0002"));
    assert!(stderr.contains("NS0003"));
    assert!(stderr.contains("NS0004"));
    assert!(stderr.contains("broken.toml"));
}

#[test]
fn test_check_json_output() {
    let output = noscope(&["check", &fixture("broken.toml"), "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let codes: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"NS0001"));
    assert!(codes.contains(&"NS0004"));

    let ghost = json
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["code"] == "NS0001")
        .unwrap();
    assert_eq!(ghost["severity"], "error");
    assert_eq!(ghost["labels"][0]["style"], "primary");
    assert!(ghost["labels"][0]["start_line"].as_u64().unwrap() > 1);
}

#[test]
fn test_check_missing_manifest() {
    let output = noscope(&["check", &fixture("nope.toml")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not load"));
}

// ────────────────────────────────────────────────────────────────────────────
// generate
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_generate_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let output = noscope(&[
        "generate",
        &fixture("god_object.toml"),
        "--out-dir",
        &out_dir.display().to_string(),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    for name in [
        "direct_accessor_scope.g.rs",
        "generated_accessor_scope.g.rs",
        "reflection_accessor_scope.g.rs",
        "god_object_accessors.g.rs",
    ] {
        assert!(out_dir.join(name).is_file(), "missing {}", name);
    }

    let direct = std::fs::read_to_string(out_dir.join("direct_accessor_scope.g.rs")).unwrap();
    assert!(direct.contains("self.target.who_co_mes_up_wi_th_th_es_en_am_es()"));
    assert!(direct.contains("self.target.value_changed.subscribe_handler(handler)"));

    let table = std::fs::read_to_string(out_dir.join("god_object_accessors.g.rs")).unwrap();
    assert!(table.contains("pub fn accessor_for_private_field()"));
    assert!(table.contains("pub fn accessor_for_readonly_private_field()"));
}

#[test]
fn test_generate_refuses_on_errors() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let output = noscope(&[
        "generate",
        &fixture("broken.toml"),
        "--out-dir",
        &out_dir.display().to_string(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nothing was generated"));
    assert!(!out_dir.exists());
}

#[test]
fn test_generate_allow_errors_skips_bad_members() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let output = noscope(&[
        "generate",
        &fixture("broken.toml"),
        "--out-dir",
        &out_dir.display().to_string(),
        "--allow-errors",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("skipped IBrokenScope::Ghost"));

    let facade = std::fs::read_to_string(out_dir.join("broken_scope.g.rs")).unwrap();
    assert!(!facade.contains("ghost"));
    assert!(facade.contains("fn renamed(&self) -> i32"));
}

#[test]
fn test_generate_default_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("noscope.toml");
    std::fs::copy(fixtures_dir().join("god_object.toml"), &manifest).unwrap();

    let output = noscope(&["generate", &manifest.display().to_string()]);
    assert!(output.status.success());
    assert!(dir
        .path()
        .join("generated")
        .join("direct_accessor_scope.g.rs")
        .is_file());
}
