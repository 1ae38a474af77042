use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert!(parsed.get("includes").is_some());
    assert_eq!(parsed["translationsRoot"], "./");
    assert_eq!(parsed["allowPlaceholderReorder"], false);
    assert_eq!(parsed["checkLocations"], true);

    // 2-space indentation
    assert!(content.contains("\n  \""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Created .qtlrc.json"));
    assert!(test.root().join(".qtlrc.json").exists());

    let content = test.read_file(".qtlrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".qtlrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains(".qtlrc.json already exists"));
    assert_eq!(test.read_file(".qtlrc.json")?, "{}");

    Ok(())
}
