use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CHINESE_SCRIPT, CliTest, stdout};

const TABLE: &str = r#"[
  ["Prefix","Original","Translation","Condition","Location","Identifier"],
  ["e","Hello","您好","seen_intro","script.rpy:3","start_1"],
  ["e","Welcome","欢迎","not (seen_intro)","script.rpy:5","start_2"],
  ["strings","Start","开始游戏","","screens.rpy:8",""]
]
"#;

#[test]
fn test_import_rewrites_scripts() -> Result<()> {
    let test = CliTest::with_game()?;
    test.write_file("chinese.table", TABLE)?;

    assert_cmd_snapshot!(test.import_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Updated 2 lines in 1 file

    ----- stderr -----
    ");

    let expected = CHINESE_SCRIPT
        .replace("    e \"你好\"", "    e \"您好\"")
        .replace("    new \"开始\"", "    new \"开始游戏\"");
    assert_eq!(test.read_file("game/tl/chinese/script.rpy")?, expected);

    Ok(())
}

#[test]
fn test_export_then_import_leaves_scripts_unchanged() -> Result<()> {
    let test = CliTest::with_game()?;
    test.export_command().output()?;

    assert_cmd_snapshot!(test.import_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Translation scripts are up to date (1 file checked)

    ----- stderr -----
    ");
    assert_eq!(test.read_file("game/tl/chinese/script.rpy")?, CHINESE_SCRIPT);

    Ok(())
}

#[test]
fn test_import_lookup_misses_are_folded() -> Result<()> {
    let test = CliTest::with_game()?;
    test.write_file(
        "chinese.table",
        "[\n  [\"Prefix\",\"Original\",\"Translation\",\"Condition\",\"Location\",\"Identifier\"],\n  [\"e\",\"Hello\",\"您好\",\"\",\"script.rpy:3\",\"start_1\"]\n]\n",
    )?;

    assert_cmd_snapshot!(test.import_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Updated 1 line in 1 file

    ----- stderr -----
    warning: 1 dialogue block(s) have no translation in the table (use -v for details)
    ");

    // Verbose runs list each block.
    test.write_file("game/tl/chinese/script.rpy", CHINESE_SCRIPT)?;
    let output = test.import_command().arg("-v").output()?;
    let out = stdout(&output);
    assert!(out.contains("start_2"));
    assert!(out.contains("lookup-miss"));

    Ok(())
}

#[test]
fn test_import_leaves_other_languages_alone() -> Result<()> {
    let test = CliTest::with_game()?;
    let french = "translate french start_1:\n    # e \"Hello\"\n    e \"Bonjour\"\n";
    test.write_file("game/tl/french/script.rpy", french)?;
    test.write_file("chinese.table", TABLE)?;

    test.import_command().output()?;
    assert_eq!(test.read_file("game/tl/french/script.rpy")?, french);

    Ok(())
}

#[test]
fn test_import_invalid_table_fails() -> Result<()> {
    let test = CliTest::with_game()?;
    test.write_file("chinese.table", "{ \"rows\": 1 }")?;

    let output = test.import_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(test.read_file("game/tl/chinese/script.rpy")?, CHINESE_SCRIPT);

    Ok(())
}
