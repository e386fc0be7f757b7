use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["inputDir", "outputDir", "packagePrefix", "extension", "lineIndex"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Created .l10ncovrc.json\n");
    assert!(test.root().join(".l10ncovrc.json").exists());

    let content = test.read_file(".l10ncovrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".l10ncovrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".l10ncovrc.json already exists"));
    assert_eq!(test.read_file(".l10ncovrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "src/main/resources/messages_de.properties",
        "save=Speichern\nquit=Schließen\n",
    )?;

    let output = test.command().arg("report").output()?;
    assert!(
        output.status.success(),
        "Report command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    let report = test.read_report()?;
    assert!(report.contains(r#"<sourcefile name="messages_de.properties">"#));

    Ok(())
}
