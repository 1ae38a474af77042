use anyhow::Result;

use crate::{CliTest, run, ts_document};

const LIVE_CONTEXT: &str = r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist</source>
        <translation>Col</translation>
    </message>
"#;

const RETIRED_MESSAGES: &str = r#"    <message>
        <source>Old label</source>
        <translation type="obsolete">Ancien</translation>
    </message>
    <message>
        <source>Gone</source>
        <translation type="vanished">Parti</translation>
    </message>
"#;

const RETIRED_CONTEXT: &str = r#"<context>
    <name>OldDialog</name>
    <message>
        <source>Close</source>
        <translation type="obsolete">Fermer</translation>
    </message>
</context>
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_ts(
        "fr",
        &format!("{}{}</context>\n{}", LIVE_CONTEXT, RETIRED_MESSAGES, RETIRED_CONTEXT),
    )?;
    Ok(test)
}

#[test]
fn test_clean_dry_run() -> Result<()> {
    let test = project()?;
    let before = test.read_file("po/GaussianBeam_fr.ts")?;

    let output = run(test.clean_command())?;

    assert_eq!(output.code, Some(0));
    assert!(
        output.stdout.contains("Would remove 3 message(s) in 1 file(s):"),
        "{}",
        output.stdout
    );
    assert!(output.stdout.contains("  - obsolete: 2 message(s)"));
    assert!(output.stdout.contains("  - vanished: 1 message(s)"));
    assert!(output.stdout.contains("Run with --apply to remove these messages."));
    assert_eq!(test.read_file("po/GaussianBeam_fr.ts")?, before);

    Ok(())
}

#[test]
fn test_clean_apply() -> Result<()> {
    let test = project()?;

    let mut cmd = test.clean_command();
    cmd.arg("--apply");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(
        output.stdout.contains("Removed 3 message(s) in 1 file(s)."),
        "{}",
        output.stdout
    );
    assert!(output.stdout.contains("1 context(s) left empty were removed too"));
    assert_eq!(
        test.read_file("po/GaussianBeam_fr.ts")?,
        ts_document("fr", &format!("{}</context>\n", LIVE_CONTEXT))
    );

    // Nothing left to clean.
    let output = run(test.clean_command())?;
    assert!(output.stdout.contains("no issues found"), "{}", output.stdout);

    Ok(())
}

#[test]
fn test_clean_vanished_only() -> Result<()> {
    let test = project()?;

    let mut cmd = test.clean_command();
    cmd.args(["--apply", "--rules", "vanished"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Removed 1 message(s) in 1 file(s)."));

    let content = test.read_file("po/GaussianBeam_fr.ts")?;
    assert!(!content.contains("Gone"));
    assert!(content.contains("Old label"));
    assert!(content.contains("OldDialog"));

    Ok(())
}
