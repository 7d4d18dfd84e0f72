/// Drives the pdf-wordviz binary the way a user would from a terminal
mod common;

use anyhow::Result;
use rexpect::spawn;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_pdf-wordviz");

#[test]
fn test_analyze_text_report() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let pdf = common::write_pdf(dir.path(), "animals.pdf", &["cat cat dog"]);

    let mut session = spawn(&format!("{} analyze {} --format text", BIN, pdf.display()), Some(10_000))?;
    session.exp_string("Source: animals.pdf")?;
    session.exp_string("Total Words: 3")?;
    session.exp_string("Unique Words: 2")?;
    session.exp_string("cat")?;
    session.exp_eof()?;
    Ok(())
}

#[test]
fn test_analyze_json_to_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let pdf = common::write_pdf(dir.path(), "doc.pdf", &["alpha beta alpha"]);
    let out = dir.path().join("report.json");

    let status = Command::new(BIN)
        .args(["analyze", &pdf.to_string_lossy(), "--format", "json", "--output", &out.to_string_lossy()])
        .status()?;
    assert!(status.success());

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
    assert_eq!(json["ranked"][0]["word"], "alpha");
    assert_eq!(json["ranked"][0]["count"], 2);
    assert_eq!(json["summary"]["unique_words"], 2);
    Ok(())
}

#[test]
fn test_analyze_html_report() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let pdf = common::write_pdf(dir.path(), "doc.pdf", &["alpha beta alpha"]);

    let output = Command::new(BIN).args(["analyze", &pdf.to_string_lossy(), "--format", "html"]).output()?;
    assert!(output.status.success());

    let html = String::from_utf8(output.stdout)?;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<td>alpha</td>"));
    Ok(())
}

#[test]
fn test_analyze_rejects_non_pdf() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let bogus = dir.path().join("notes.pdf");
    std::fs::write(&bogus, "these are not the bytes of a PDF")?;

    let output = Command::new(BIN).args(["analyze", &bogus.to_string_lossy()]).output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Not a readable PDF"));
    Ok(())
}

#[test]
fn test_config_file_is_validated() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let pdf = common::write_pdf(dir.path(), "doc.pdf", &["alpha"]);
    let config = dir.path().join("wordviz.toml");
    std::fs::write(&config, "[cloud]\nwidth = 0\n")?;

    let output = Command::new(BIN)
        .args(["--config", &config.to_string_lossy(), "analyze", &pdf.to_string_lossy()])
        .output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
    Ok(())
}
