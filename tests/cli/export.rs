use std::fs;

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CHINESE_SCRIPT, CliTest, stderr, stdout};

fn row(cells: [&str; 6]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_export_writes_table() -> Result<()> {
    let test = CliTest::with_game()?;

    assert_cmd_snapshot!(test.export_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Exported 3 units from 1 file to ./chinese.table

    ----- stderr -----
    ");

    let content = test.read_file("chinese.table")?;
    assert!(content.starts_with(
        "[\n  [\"Prefix\",\"Original\",\"Translation\",\"Condition\",\"Location\",\"Identifier\"]"
    ));
    assert_eq!(
        test.table_rows()?,
        vec![
            row(["e", "Hello", "你好", "", "script.rpy:3", "start_1"]),
            row(["e", "Welcome", "欢迎", "", "script.rpy:5", "start_2"]),
            row(["strings", "Start", "开始", "", "screens.rpy:8", ""]),
        ]
    );

    Ok(())
}

#[test]
fn test_export_overwrites_existing_table() -> Result<()> {
    let test = CliTest::with_game()?;
    test.write_file("chinese.table", "not a table")?;

    assert_cmd_snapshot!(test.export_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Exported 3 units from 1 file to ./chinese.table
    note: overwrote the existing table

    ----- stderr -----
    ");
    assert_eq!(test.table_rows()?.len(), 3);

    Ok(())
}

#[test]
fn test_export_reports_repeated_lines() -> Result<()> {
    let test = CliTest::with_file(
        "game/tl/chinese/script.rpy",
        r#"# game/script.rpy:1
translate chinese a1:
    # e "Yes"
    e "是"

# game/script.rpy:7
translate chinese a2:
    # e "Yes"
    e "是的"
"#,
    )?;

    assert_cmd_snapshot!(test.export_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: e "Yes" in script.rpy  repeat
      --> ./game/tl/chinese/script.rpy:8:5
      |
    8 |     # e "Yes"
      |     ^
      = note: first seen at line 3

    ✘ 1 problems (0 errors, 1 warning)

    ✓ Exported 2 units from 1 file to ./chinese.table

    ----- stderr -----
    "#);
    assert_eq!(test.table_rows()?.len(), 2);

    Ok(())
}

#[test]
fn test_export_reads_language_from_config() -> Result<()> {
    let test = CliTest::with_file("game/tl/chinese/script.rpy", CHINESE_SCRIPT)?;
    test.write_file(".tlbridgerc.json", r#"{ "language": "chinese" }"#)?;

    let output = test.command().arg("export").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(test.root().join("chinese.table").exists());

    Ok(())
}

#[test]
fn test_export_ignores_other_extensions_and_patterns() -> Result<()> {
    let test = CliTest::with_file("game/tl/chinese/script.rpy", CHINESE_SCRIPT)?;
    test.write_file(
        "game/tl/chinese/notes.txt",
        "translate chinese n1:\n    # e \"Note\"\n    e \"笔记\"\n",
    )?;
    test.write_file(
        "game/tl/chinese/old/legacy.rpy",
        "translate chinese l1:\n    # e \"Legacy\"\n    e \"旧\"\n",
    )?;
    test.write_file(".tlbridgerc.json", r#"{ "ignores": ["**/old/**"] }"#)?;

    let output = test.export_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    let originals: Vec<String> = test.table_rows()?.into_iter().map(|r| r[1].clone()).collect();
    assert_eq!(originals, vec!["Hello", "Welcome", "Start"]);

    Ok(())
}

#[test]
fn test_export_undecodable_file_fails() -> Result<()> {
    let test = CliTest::with_file("game/tl/chinese/script.rpy", CHINESE_SCRIPT)?;
    fs::write(
        test.root().join("game/tl/chinese/broken.rpy"),
        [0xff, 0xfe, 0x00, 0x80],
    )?;

    let output = test.export_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("parse-error"));
    // Other files still make it into the table.
    assert_eq!(test.table_rows()?.len(), 3);

    Ok(())
}

#[test]
fn test_export_missing_language_dir() -> Result<()> {
    let test = CliTest::with_file("game/script.rpy", "label start:\n")?;

    assert_cmd_snapshot!(test.export_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Language directory not found: ./game/tl/chinese
    ");
    assert!(!test.root().join("chinese.table").exists());

    Ok(())
}

#[test]
fn test_export_requires_language() -> Result<()> {
    let test = CliTest::with_game()?;

    assert_cmd_snapshot!(test.command().arg("export"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: No language given: pass --language or set "language" in .tlbridgerc.json
    "#);

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("--help"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    A fast CLI tool for exporting, annotating and re-importing visual-novel script translations

    Usage: tlbridge [COMMAND]

    Commands:
      export  Export translation scripts into <language>.table
      patch   Record the if/elif/else condition of each dialogue line in the table
      import  Write translations from the table back into the translation scripts
      init    Initialize a new .tlbridgerc.json configuration file
      help    Print this message or the help of the given subcommand(s)

    Options:
      -h, --help     Print help
      -V, --version  Print version

    ----- stderr -----
    ");

    Ok(())
}
