use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn renamerged(settings: &Path) -> Command {
    let mut cmd = Command::cargo_bin("renamerged").unwrap();
    cmd.arg("--config").arg(settings);
    cmd
}

#[test]
fn test_config_init_show_get() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("nested").join("user_settings.json");

    renamerged(&settings)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created settings file"));
    assert!(settings.exists());

    renamerged(&settings)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    renamerged(&settings)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Rename Saja\""))
        .stdout(predicate::str::contains("\"Nama Lawan Transaksi\""));

    renamerged(&settings)
        .args(["config", "get", "separator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"-\""));

    renamerged(&settings)
        .args(["config", "get", "max_filename_length"])
        .assert()
        .success()
        .stdout(predicate::str::contains("null"));
}

#[test]
fn test_config_set_validates_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("user_settings.json");

    renamerged(&settings)
        .args(["config", "set", "separator", "_"])
        .assert()
        .success();
    let saved = fs::read_to_string(&settings).unwrap();
    assert!(saved.contains("\"separator\": \"_\""), "{}", saved);

    renamerged(&settings)
        .args(["config", "set", "mode", "merge"])
        .assert()
        .success();
    renamerged(&settings)
        .args(["config", "get", "mode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rename dan Merge"));

    // Reserved characters are refused and the file is left alone
    renamerged(&settings)
        .args(["config", "set", "slash_replacement", ":"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved character"));
    assert!(!fs::read_to_string(&settings).unwrap().contains("\":\""));

    renamerged(&settings)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Setting not found"));
}

#[test]
fn test_config_reset_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("user_settings.json");

    renamerged(&settings).args(["config", "init"]).assert().success();
    renamerged(&settings)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));

    renamerged(&settings).args(["config", "reset"]).assert().success();
    assert!(!settings.exists());

    renamerged(&settings)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}

#[test]
fn test_inspect_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    renamerged(&dir.path().join("user_settings.json"))
        .args(["inspect", "/nonexistent/faktur.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_inspect_rejects_non_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("faktur.pdf");
    fs::write(&file, "bukan pdf").unwrap();

    renamerged(&dir.path().join("user_settings.json"))
        .arg("inspect")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a readable PDF"));
}

#[test]
fn test_run_on_empty_folder() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");
    fs::create_dir(&input).unwrap();

    renamerged(&dir.path().join("user_settings.json"))
        .arg("run")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 0 files"));

    let summary = fs::read_to_string(output.join("summary.csv")).unwrap();
    assert!(summary.starts_with("input_dir,output_dir,mode,total,renamed,merged,errors"));
    assert!(summary.contains("Rename Saja"));
}

#[test]
fn test_run_counts_unreadable_pdf_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("rusak.pdf"), "bukan pdf").unwrap();

    renamerged(&dir.path().join("user_settings.json"))
        .arg("run")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--mode", "merge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: Rename dan Merge"))
        .stdout(predicate::str::contains("1 errors"));

    // The source is never moved
    assert!(input.join("rusak.pdf").exists());
}

#[test]
fn test_run_missing_input_folder_fails() {
    let dir = tempfile::tempdir().unwrap();
    renamerged(&dir.path().join("user_settings.json"))
        .args(["run", "/nonexistent/in", "-o"])
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input folder not found"));
}

#[test]
fn test_run_rejects_tiny_max_length() {
    let dir = tempfile::tempdir().unwrap();
    renamerged(&dir.path().join("user_settings.json"))
        .arg("run")
        .arg(dir.path())
        .arg("-o")
        .arg(dir.path().join("out"))
        .args(["--max-length", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("below the minimum"));
}

#[test]
fn test_check_empty_folder() {
    let dir = tempfile::tempdir().unwrap();
    renamerged(&dir.path().join("user_settings.json"))
        .arg("check")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No invoices with a partner name"));
}

#[test]
fn test_rust_log_enables_debug_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("rusak.pdf"), "bukan pdf").unwrap();

    // Default level hides debug events
    renamerged(&dir.path().join("user_settings.json"))
        .env_remove("RUST_LOG")
        .arg("check")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping invalid PDF").not());

    renamerged(&dir.path().join("user_settings.json"))
        .env("RUST_LOG", "renamerged_core=debug")
        .arg("check")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping invalid PDF rusak.pdf"));
}
