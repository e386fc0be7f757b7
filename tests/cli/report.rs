use anyhow::Result;
use insta::{assert_snapshot, with_settings};

use crate::{CliTest, REPORT_PATH, stderr, stdout};

fn fixture() -> Result<CliTest> {
    let test = CliTest::with_file("res/a/b/strings.properties", "a=hello\nb=héllo\nc=\n")?;
    test.write_file(
        "res/ui/messages_de.properties",
        "# UI\nsave=Speichern\nquit: Beenden\n",
    )?;
    test.write_file("res/ui/readme.txt", "not=a resource ü\n")?;
    Ok(test)
}

#[test]
fn test_report_xml() -> Result<()> {
    let test = fixture()?;

    let output = test
        .report_command()
        .args(["--package-prefix", "app."])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let xml = test.read_report()?;

    with_settings!({filters => vec![
        (r#"start="\d+" dump="\d+""#, r#"start="[start]" dump="[dump]""#),
    ]}, {
        assert_snapshot!(xml, @r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><!DOCTYPE report PUBLIC "-//JACOCO//DTD Report 1.1//EN" "report.dtd"><report name=""><sessioninfo id="id" start="[start]" dump="[dump]"/><package name="app.a/b"><sourcefile name="strings.properties"><line nr="1" mi="1" ci="0" mb="0" cb="0"/><line nr="2" mi="0" ci="1" mb="0" cb="0"/><line nr="3" mi="1" ci="0" mb="0" cb="0"/><counter type="INSTRUCTION" missed="2" covered="1"/><counter type="LINE" missed="2" covered="1"/></sourcefile><counter type="INSTRUCTION" missed="2" covered="1"/><counter type="LINE" missed="2" covered="1"/></package><package name="app.ui"><sourcefile name="messages_de.properties"><line nr="2" mi="1" ci="0" mb="0" cb="0"/><line nr="3" mi="1" ci="0" mb="0" cb="0"/><counter type="INSTRUCTION" missed="2" covered="0"/><counter type="LINE" missed="2" covered="0"/></sourcefile><counter type="INSTRUCTION" missed="2" covered="0"/><counter type="LINE" missed="2" covered="0"/></package><counter type="INSTRUCTION" missed="4" covered="1"/><counter type="LINE" missed="4" covered="1"/></report>"#);
    });

    Ok(())
}

#[test]
fn test_report_summary() -> Result<()> {
    let test = fixture()?;

    let output = test.report_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(
        stdout.contains("✓ Wrote coverage for 2 resource files to"),
        "stdout: {}",
        stdout
    );
    assert!(stdout.contains(REPORT_PATH));
    assert!(stdout.contains("1 of 5 keys translated (20.0%)"));
    assert!(stderr(&output).is_empty(), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_report_from_config_file() -> Result<()> {
    let test = fixture()?;
    test.write_file(
        ".l10ncovrc.json",
        r#"{
            "inputDir": "res",
            "outputDir": "build",
            "packagePrefix": "org.example.",
            "sessionId": "nightly"
        }"#,
    )?;

    let output = test.command().arg("report").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let xml = test.read_report()?;
    assert!(xml.contains(r#"<package name="org.example.a/b">"#));
    assert!(xml.contains(r#"<sessioninfo id="nightly" "#));

    Ok(())
}

#[test]
fn test_report_from_environment() -> Result<()> {
    let test = fixture()?;

    let output = test
        .command()
        .arg("report")
        .env("L10N_COVERAGE_INPUT_DIR", "res")
        .env("L10N_COVERAGE_OUTPUT_DIR", "build")
        .env("L10N_COVERAGE_PACKAGE_PREFIX", "env.")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.read_report()?.contains(r#"<package name="env.ui">"#));

    Ok(())
}

#[test]
fn test_flags_override_config_file() -> Result<()> {
    let test = fixture()?;
    test.write_file(
        ".l10ncovrc.json",
        r#"{ "inputDir": "elsewhere", "outputDir": "build", "packagePrefix": "cfg." }"#,
    )?;

    let output = test
        .command()
        .args(["report", "--input-dir", "res", "--package-prefix", "cli."])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.read_report()?.contains(r#"<package name="cli.ui">"#));

    Ok(())
}

#[test]
fn test_naive_line_index_warns() -> Result<()> {
    let test = fixture()?;

    let output = test
        .report_command()
        .args(["--line-index", "naive"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let stderr = stderr(&output);
    assert_eq!(stderr.matches("warning:").count(), 1, "stderr: {}", stderr);
    assert!(stderr.contains("warning: 'quit' not found in line index"));
    assert!(stderr.contains("messages_de.properties"));

    let xml = test.read_report()?;
    assert!(xml.contains(r#"<counter type="INSTRUCTION" missed="3" covered="1"/>"#));

    Ok(())
}

#[test]
fn test_verbose_lists_untranslated() -> Result<()> {
    let test = fixture()?;

    let output = test.report_command().arg("--verbose").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("(2 untranslated)"), "stdout: {}", stdout);
    assert!(stdout.contains("1 | a=hello"));
    assert!(stdout.contains("3 | quit: Beenden"));
    assert!(stdout.contains("Packages:"));

    Ok(())
}

#[test]
fn test_missing_input_dir_config() -> Result<()> {
    let test = fixture()?;

    let output = test
        .command()
        .args(["report", "--output-dir", "build"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Input directory is not configured"));
    assert!(!test.root().join(REPORT_PATH).exists());

    Ok(())
}

#[test]
fn test_nonexistent_input_dir() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.report_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not exist"));
    assert!(!test.root().join(REPORT_PATH).exists());

    Ok(())
}

#[test]
fn test_malformed_resource_aborts() -> Result<()> {
    let test = fixture()?;
    test.write_file("res/z/broken.properties", "k=\\u00G0\n")?;

    let output = test.report_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr(&output);
    assert!(stderr.contains("broken.properties"), "stderr: {}", stderr);
    assert!(stderr.contains("malformed escape sequence on line 1"));
    assert!(!test.root().join(REPORT_PATH).exists());

    Ok(())
}

#[test]
fn test_repeated_runs_produce_same_coverage() -> Result<()> {
    let test = fixture()?;
    let strip_session = |xml: String| {
        let start = xml.find("<sessioninfo").unwrap_or(0);
        let end = xml[start..].find("/>").map(|i| start + i + 2).unwrap_or(start);
        format!("{}{}", &xml[..start], &xml[end..])
    };

    test.report_command().output()?;
    let first = strip_session(test.read_report()?);
    test.report_command().output()?;
    let second = strip_session(test.read_report()?);

    assert_eq!(first, second);
    assert!(!first.contains("sessioninfo"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("report"));
    assert!(stdout.contains("init"));

    Ok(())
}
