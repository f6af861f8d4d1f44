//! Smoke tests for the `kmap` binary

use std::path::Path;
use std::process::{Command, ExitStatus};

fn run_kmap(args: &[&str], dir: &Path) -> (ExitStatus, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_kmap"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute kmap");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (output.status, stdout, stderr)
}

#[test]
fn test_table_text() {
    let dir = tempfile::tempdir().unwrap();
    let (status, stdout, _) = run_kmap(&["table", "A & B"], dir.path());
    assert!(status.success());
    assert!(stdout.contains("A B | Y"));
    assert!(stdout.contains("1 1 | 1"));
    assert!(stdout.contains("Simplified: A & B"));
    assert!(stdout.contains("Pretty:     A·B"));
    assert!(stdout.contains("Minterms:   Σm(3)"));
}

#[test]
fn test_table_json() {
    let dir = tempfile::tempdir().unwrap();
    let (status, stdout, _) = run_kmap(&["table", "A | B", "--json"], dir.path());
    assert!(status.success());
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["success"], serde_json::json!(true));
    assert_eq!(v["num_variables"], serde_json::json!(2));
}

#[test]
fn test_kmap_text() {
    let dir = tempfile::tempdir().unwrap();
    let (status, stdout, _) = run_kmap(&["kmap", "A ^ B"], dir.path());
    assert!(status.success());
    assert!(stdout.contains("A\\B"));
    assert!(stdout.contains("Simplified: ~A & B | A & ~B"));

    let (status, stdout, _) = run_kmap(&["kmap", "A & B & C & D & E"], dir.path());
    assert!(status.success());
    assert!(stdout.contains("K-map not available for 5 variables"));
}

#[test]
fn test_mode_flag_and_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stdout, _) = run_kmap(&["kmap", "A", "--mode", "compat"], dir.path());
    assert!(stdout.contains("Simplified: ~A"));

    std::fs::write(dir.path().join("kmap.yaml"), "simplify:\n  mode: compat\n").unwrap();
    let (_, stdout, _) = run_kmap(&["kmap", "A & B & C & D & E"], dir.path());
    assert!(stdout.contains("Simplified: row31"));
}

#[test]
fn test_verilog_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let (status, stdout, _) = run_kmap(&["verilog", "A | B", "-o", "out.v"], dir.path());
    assert!(status.success());
    assert!(stdout.is_empty());
    let code = std::fs::read_to_string(dir.path().join("out.v")).unwrap();
    assert!(code.contains("assign Y = A || B;"));
}

#[test]
fn test_verilog_simulate_disabled_uses_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("kmap.yaml"), "simulator:\n  enabled: false\n").unwrap();
    let (status, stdout, _) = run_kmap(&["verilog", "A", "--simulate"], dir.path());
    assert!(status.success());
    assert!(stdout.contains("// Simulation (Fallback)"));
}

#[test]
fn test_errors_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, stderr) = run_kmap(&["table", "A & (B"], dir.path());
    assert!(!status.success());
    assert!(stderr.contains("Unbalanced parentheses"));

    let (status, stdout, _) = run_kmap(&["table", "", "--json"], dir.path());
    assert!(!status.success());
    assert!(stdout.contains("No expression provided"));
}

#[test]
fn test_bad_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("kmap.yaml"), "render:\n  step_delay: 0\n").unwrap();
    let (status, _, stderr) = run_kmap(&["table", "A"], dir.path());
    assert!(!status.success());
    assert!(stderr.contains("step_delay"));
}

#[test]
fn test_schema() {
    let dir = tempfile::tempdir().unwrap();
    let (status, stdout, _) = run_kmap(&["schema"], dir.path());
    assert!(status.success());
    let schema: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(schema["properties"]["simplify"].is_object());
    assert!(schema["properties"]["render"].is_object());
    assert!(schema["properties"]["simulator"].is_object());
}
