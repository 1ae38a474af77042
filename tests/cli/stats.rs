use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, run};

#[test]
fn test_stats_table() -> Result<()> {
    let test = CliTest::new()?;
    test.write_ts(
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
    )?;
    test.write_ts(
        "de",
        r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist</source>
        <translation>Taille</translation>
    </message>
</context>
"#,
    )?;

    let output = run(test.stats_command())?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @r"
    Locale    Total  Finished  Unfinished  Obsolete    Done  File
    de            1         1           0         0  100.0%  ./po/GaussianBeam_de.ts
    fr            2         1           1         1   50.0%  ./po/GaussianBeam_fr.ts
    ");

    Ok(())
}

#[test]
fn test_stats_no_translation_files() -> Result<()> {
    let test = CliTest::with_file("po/README", "translations go here")?;

    let mut cmd = test.stats_command();
    cmd.args(["--translations-root", "po"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("No translation files"), "{}", output.stderr);

    Ok(())
}
