use anyhow::Result;

use crate::{CliTest, run};

const WIDGET_CPP: &str = r#"
void GaussianBeamWidget::updateView()
{
	waistLabel->setText(tr("Waist"));
	lensLabel->setText(tr("Lens"));
}
"#;

fn project(contexts: &str) -> Result<CliTest> {
    let test = CliTest::with_file("src/GaussianBeamWidget.cpp", WIDGET_CPP)?;
    test.write_ts("fr", contexts)?;
    Ok(test)
}

#[test]
fn test_clean_project() -> Result<()> {
    let test = project(
        r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist</source>
        <translation>Col</translation>
    </message>
    <message>
        <source>Lens</source>
        <translation>Lentille</translation>
    </message>
</context>
"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .contains("Checked 1 source file, 1 translation file - no issues found"),
        "{}",
        output.stdout
    );

    Ok(())
}

#[test]
fn test_unfinished_is_a_warning() -> Result<()> {
    let test = project(
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
</context>
"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .contains("warning: \"GaussianBeamWidget::Lens\"  unfinished"),
        "{}",
        output.stdout
    );
    assert!(output.stdout.contains("GaussianBeam_fr.ts:"));
    assert!(output.stdout.contains("= note: no translation"));
    assert!(output.stdout.contains("1 problem (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_placeholder_mismatch_fails() -> Result<()> {
    let test = CliTest::with_file(
        "src/GaussianBeamWidget.cpp",
        r#"
void GaussianBeamWidget::updateView()
{
	waistLabel->setText(tr("Waist: %1").arg(waist));
}
"#,
    )?;
    test.write_ts(
        "fr",
        r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist: %1</source>
        <translation>Col</translation>
    </message>
</context>
"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("placeholder-mismatch"), "{}", output.stdout);
    assert!(output.stdout.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_missing_message_points_at_source() -> Result<()> {
    let test = project(
        r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist</source>
        <translation>Col</translation>
    </message>
</context>
"#,
    )?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert!(
        output
            .stdout
            .contains("error: \"GaussianBeamWidget::Lens\"  missing-message"),
        "{}",
        output.stdout
    );
    assert!(output.stdout.contains("src/GaussianBeamWidget.cpp:5:"));
    assert!(output.stdout.contains("missing in: fr"));

    Ok(())
}

#[test]
fn test_selected_rules_only() -> Result<()> {
    let test = project(
        r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist</source>
        <translation type="unfinished"></translation>
    </message>
</context>
"#,
    )?;

    let mut cmd = test.check_command();
    cmd.arg("placeholder");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(!output.stdout.contains("missing-message"));
    assert!(!output.stdout.contains("unfinished"));
    assert!(
        output
            .stdout
            .contains("Checked 1 translation file - no issues found"),
        "{}",
        output.stdout
    );

    Ok(())
}

#[test]
fn test_obsolete_and_untranslated_warnings() -> Result<()> {
    let test = project(
        r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist</source>
        <translation>Waist</translation>
    </message>
    <message>
        <source>Lens</source>
        <translation>Lentille</translation>
    </message>
    <message>
        <source>Old label</source>
        <translation type="obsolete">Ancien</translation>
    </message>
</context>
"#,
    )?;

    let mut cmd = test.check_command();
    cmd.args(["untranslated", "obsolete"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("\"GaussianBeamWidget::Waist\"  untranslated"));
    assert!(output.stdout.contains("\"GaussianBeamWidget::Old label\"  obsolete"));
    assert!(output.stdout.contains("2 problems (0 errors, 2 warnings)"));

    Ok(())
}

#[test]
fn test_config_ignore_texts() -> Result<()> {
    let test = project(
        r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist</source>
        <translation>Waist</translation>
    </message>
</context>
"#,
    )?;
    test.write_file(".qtlrc.json", r#"{ "ignoreTexts": ["Waist"] }"#)?;

    let mut cmd = test.check_command();
    cmd.arg("untranslated");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(!output.stdout.contains("untranslated"));

    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> Result<()> {
    let test = CliTest::with_file(
        "po/GaussianBeam_de.ts",
        "<TS version=\"2.1\" language=\"de\"><context><name>A</name>\n<message><source>A</translation></message></context></TS>",
    )?;

    let mut cmd = test.check_command();
    cmd.arg("unfinished");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("parse-error"), "{}", output.stdout);
    assert!(output.stdout.contains("GaussianBeam_de.ts"));

    Ok(())
}

#[test]
fn test_missing_translations_directory() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.check_command();
    cmd.args(["--translations-root", "po"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Error:"), "{}", output.stderr);
    assert!(output.stderr.contains("does not exist"));

    Ok(())
}

#[test]
fn test_unknown_rule_is_rejected() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.check_command();
    cmd.arg("hardcoded");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("invalid value 'hardcoded'"));

    Ok(())
}

const STALE_CONTEXTS: &str = r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <location filename="../src/GaussianBeamWidget.cpp" line="4"/>
        <source>Waist</source>
        <translation>Col</translation>
    </message>
    <message>
        <location filename="../src/OldWidget.cpp" line="3"/>
        <location filename="../src/GaussianBeamWidget.cpp" line="40"/>
        <source>Lens</source>
        <translation>Lentille</translation>
    </message>
</context>
"#;

#[test]
fn test_stale_locations_are_warnings() -> Result<()> {
    let test = project(STALE_CONTEXTS)?;

    let mut cmd = test.check_command();
    cmd.arg("stale-location");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .contains("warning: \"GaussianBeamWidget::Lens\"  stale-location"),
        "{}",
        output.stdout
    );
    assert!(output.stdout.contains("../src/OldWidget.cpp not found"));
    assert!(
        output
            .stdout
            .contains("../src/GaussianBeamWidget.cpp:40 is past the end of the file (6 lines)")
    );
    assert!(!output.stdout.contains("\"GaussianBeamWidget::Waist\""));
    assert!(output.stdout.contains("2 problems (0 errors, 2 warnings)"));

    Ok(())
}

#[test]
fn test_stale_locations_disabled_by_config() -> Result<()> {
    let test = project(STALE_CONTEXTS)?;
    test.write_file(".qtlrc.json", r#"{"checkLocations":false}"#)?;

    let mut cmd = test.check_command();
    cmd.arg("stale-location");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(!output.stdout.contains("stale-location"), "{}", output.stdout);
    assert!(output.stdout.contains("no issues found"), "{}", output.stdout);

    Ok(())
}

#[test]
fn test_legacy_latin1_sources_match_code() -> Result<()> {
    let test = CliTest::with_file(
        "src/OpticsView.cpp",
        r#"
void OpticsView::drawUnits()
{
	unitLabel->setText(tr("µm"));
}
"#,
    )?;
    test.write_file(
        "po/GaussianBeam_fr.ts",
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS><TS version="1.1" language="fr">
<defaultcodec>UTF-8</defaultcodec>
<context>
    <name>OpticsView</name>
    <message>
        <source>&#xc2;&#xb5;m</source>
        <translation>µm</translation>
    </message>
</context>
</TS>
"#,
    )?;

    let mut cmd = test.check_command();
    cmd.args(["missing", "unused"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "{}", output.stdout);
    assert!(!output.stdout.contains("missing-message"));
    assert!(!output.stdout.contains("unused-message"));
    assert!(output.stdout.contains("no issues found"));

    Ok(())
}
