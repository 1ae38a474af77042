use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary Qt project with a po/ directory for `.ts` files.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        fs::create_dir_all(project_root.join("po"))?;
        fs::create_dir_all(project_root.join(".git"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a test project with one translation file per locale
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_translations(vec![
    ///     ("fr", "<context>...</context>"),
    /// ])?;
    /// ```
    pub fn with_translations(locales: Vec<(&str, &str)>) -> Result<Self> {
        let fixture = Self::new()?;
        for (locale, contexts) in locales {
            fixture.write_ts(locale, contexts)?;
        }
        Ok(fixture)
    }

    /// Write po/GaussianBeam_<locale>.ts
    pub fn write_ts(&self, locale: &str, contexts: &str) -> Result<()> {
        let path = self
            .project_root
            .join("po")
            .join(format!("GaussianBeam_{}.ts", locale));
        let content = format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <!DOCTYPE TS>\n\
             <TS version=\"2.1\" language=\"{}\">\n\
             {}\
             </TS>\n",
            locale, contexts
        );
        fs::write(&path, content)
            .with_context(|| format!("Failed to write translation file: {}", path.display()))
    }

    /// Write a C++ or .ui source file
    pub fn write_source(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write source file: {}", path.display()))
    }

    /// Write a .qtlrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".qtlrc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// French file with one finished, one unfinished and one obsolete message,
/// and a source file using the first two plus one string missing from it.
pub fn fixture_gaussian_beam() -> Result<McpTestFixture> {
    let fixture = McpTestFixture::with_translations(vec![(
        "fr",
        r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist</source>
        <translation>Col</translation>
    </message>
    <message>
        <source>Lens</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>Old label</source>
        <translation type="obsolete">Ancien</translation>
    </message>
</context>
"#,
    )])?;
    fixture.write_source(
        "src/GaussianBeamWidget.cpp",
        r#"
void GaussianBeamWidget::updateView()
{
	waistLabel->setText(tr("Waist"));
	lensLabel->setText(tr("Lens"));
	focalLabel->setText(tr("Focal length"));
}
"#,
    )?;
    Ok(fixture)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in a scan result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
