use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RESUME: &str = "John Smith\njohn.smith@example.com\n555-123-4567\nSkills: Python, AWS, Docker\nHyderabad, Telangana\nBachelor of Technology in Computer Science 2016-2020";

/// A `vitae` command whose user config directory is inside `home`.
fn vitae(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vitae").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_resume(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn parse_prints_json() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "john.txt", RESUME);

    vitae(dir.path())
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"John Smith\""))
        .stdout(predicate::str::contains("\"location\": \"Hyderabad, Telangana\""))
        .stdout(predicate::str::contains("\"experience\": 1"))
        .stdout(predicate::str::contains("metadata").not());
}

#[test]
fn parse_with_report() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "john.txt", RESUME);

    vitae(dir.path())
        .args(["parse", "--report"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"field_sources\""))
        .stdout(predicate::str::contains("\"processed_at\""));
}

#[test]
fn parse_text_and_csv_formats() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "john.txt", RESUME);

    vitae(dir.path())
        .args(["parse", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: John Smith"))
        .stdout(predicate::str::contains("Skills: Python, AWS, Docker"));

    vitae(dir.path())
        .args(["parse", "-f", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,email,phone,location,skills"))
        .stdout(predicate::str::contains("Python; AWS; Docker"));
}

#[test]
fn parse_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "john.txt", RESUME);
    let output = dir.path().join("out.json");

    vitae(dir.path())
        .arg("parse")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["email"], "john.smith@example.com");
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    vitae(dir.path())
        .args(["parse", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn broken_pdf_fails_unless_lenient() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "jane_doe.pdf", "%PDF-1.4 truncated");

    vitae(dir.path())
        .arg("parse")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to extract text"));

    vitae(dir.path())
        .args(["parse", "--lenient"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Jane Doe\""))
        .stdout(predicate::str::contains("\"education\": \"Bachelor's Degree\""));
}

#[test]
fn declared_mime_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "upload.pdf", RESUME);

    vitae(dir.path())
        .args(["parse", "--mime", "text/plain"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"John Smith\""));
}

#[test]
fn config_file_changes_results() {
    let dir = TempDir::new().unwrap();
    let input = write_resume(&dir, "john.txt", RESUME);
    let config = write_resume(
        &dir,
        "config.json",
        r#"{"inference": {"institution_defaults": false, "synthesize_about": false}}"#,
    );

    vitae(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"education\": \"Bachelor's in Computer Science (2016 - 2020)\"",
        ))
        .stdout(predicate::str::contains("\"about\"").not());
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("john.txt"), RESUME).unwrap();
    fs::write(inputs.join("empty.txt"), "").unwrap();
    fs::write(inputs.join("broken.pdf"), "%PDF-1.4 truncated").unwrap();
    fs::write(inputs.join("notes.docx"), "ignored").unwrap();

    let pattern = format!("{}/*", inputs.display());
    vitae(dir.path())
        .args(["batch", pattern.as_str(), "--summary", "--continue-on-error", "--output-dir"])
        .arg(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("1 failed"));

    assert!(outputs.join("john.json").exists());
    assert!(outputs.join("empty.json").exists());
    assert!(!outputs.join("broken.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,name"));
    assert!(summary.contains("broken.pdf,error"));
    assert!(summary.contains("john.txt,success,John Smith"));
}

#[test]
fn batch_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    write_resume(&dir, "broken.pdf", "%PDF-1.4 truncated");

    let pattern = format!("{}/*.pdf", dir.path().display());
    vitae(dir.path())
        .args(["batch", pattern.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    vitae(dir.path())
        .args(["batch", pattern.as_str(), "--lenient", "--summary", "--output-dir"])
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 recovered from filename"));
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();

    vitae(dir.path())
        .args(["config", "get", "inference.about_max_chars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("150"));

    vitae(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    vitae(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    vitae(dir.path())
        .args(["config", "set", "inference.about_max_chars", "80"])
        .assert()
        .success();

    vitae(dir.path())
        .args(["config", "get", "inference.about_max_chars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("80"));

    vitae(dir.path())
        .args(["config", "set", "inference.no_such_key", "1"])
        .assert()
        .failure();

    vitae(dir.path())
        .args(["config", "set", "inference.chars_per_experience_year", "0"])
        .assert()
        .failure();
}

#[test]
fn config_path_reports_status() {
    let dir = TempDir::new().unwrap();

    vitae(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("not created"));
}
