use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["gameDir"], "game");
    assert_eq!(parsed["tlDir"], "tl");
    assert_eq!(
        parsed["scriptExtensions"],
        serde_json::json!(["script", "rpy"])
    );
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .tlbridgerc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".tlbridgerc.json").exists());
    let content = test.read_file(".tlbridgerc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".tlbridgerc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .tlbridgerc.json already exists
    ");
    assert_eq!(test.read_file(".tlbridgerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_game()?;

    test.command().arg("init").output()?;

    let output = test.export_command().output()?;
    assert!(
        output.status.success(),
        "Export should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
