use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr};

fn conditions(test: &CliTest) -> Result<Vec<(String, String)>> {
    Ok(test
        .table_rows()?
        .into_iter()
        .map(|row| (row[1].clone(), row[3].clone()))
        .collect())
}

#[test]
fn test_patch_records_conditions() -> Result<()> {
    let test = CliTest::with_game()?;
    test.export_command().output()?;

    assert_cmd_snapshot!(test.patch_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Patched 2 rows in ./chinese.table
      - unique: 2, repeat: 0, unmatched: 0

    ----- stderr -----
    ");

    assert_eq!(
        conditions(&test)?,
        vec![
            ("Hello".to_string(), "seen_intro".to_string()),
            ("Welcome".to_string(), "not (seen_intro)".to_string()),
            ("Start".to_string(), String::new()),
        ]
    );

    Ok(())
}

#[test]
fn test_patch_flags_ambiguous_rows_as_repeat() -> Result<()> {
    let test = CliTest::with_file(
        "game/tl/chinese/script.rpy",
        r#"# game/script.rpy:3
translate chinese a1:
    # e "Yes"
    e "是"

# game/script.rpy:6
translate chinese a2:
    # e "Yes"
    e "是的"
"#,
    )?;
    test.write_file(
        "game/script.rpy",
        "label start:\n    if asked:\n        e \"Yes\"\n    elif forced:\n        pass\n    e \"Yes\"\n",
    )?;
    test.export_command().output()?;

    assert_cmd_snapshot!(test.patch_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: e "Yes" in script.rpy  repeat
      --> ./game/script.rpy:3:9
      |
    3 |         e "Yes"
      |         ^
      = note: rows 2, 3 marked as repeat

    ✘ 1 problems (0 errors, 1 warning)

    ✓ Patched 2 rows in ./chinese.table
      - unique: 0, repeat: 1, unmatched: 0

    ----- stderr -----
    "#);
    assert_eq!(
        conditions(&test)?,
        vec![
            ("Yes".to_string(), "repeat".to_string()),
            ("Yes".to_string(), "repeat".to_string()),
        ]
    );

    Ok(())
}

#[test]
fn test_patch_warns_about_unmatched_lines() -> Result<()> {
    let test = CliTest::with_game()?;
    test.export_command().output()?;
    test.write_file(
        "game/extra.rpy",
        "label extra:\n    if late:\n        e \"Not translated yet\"\n",
    )?;

    assert_cmd_snapshot!(test.patch_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: e "Not translated yet" in extra.rpy  unmatched-key
      --> ./game/extra.rpy:3:9
      |
    3 |         e "Not translated yet"
      |         ^
      = note: no table row for condition `late`
      = hint: run `tlbridge export` to refresh the table

    ✘ 1 problems (0 errors, 1 warning)

    ✓ Patched 2 rows in ./chinese.table
      - unique: 2, repeat: 0, unmatched: 1

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_patch_skips_translation_tree() -> Result<()> {
    let test = CliTest::with_game()?;
    test.export_command().output()?;
    // Conditional blocks under tl/ are translations, not originals.
    test.write_file(
        "game/tl/french/script.rpy",
        "label x:\n    if other:\n        e \"Hello\"\n",
    )?;

    test.patch_command().output()?;
    assert_eq!(conditions(&test)?[0].1, "seen_intro");

    Ok(())
}

#[test]
fn test_patch_without_table_fails() -> Result<()> {
    let test = CliTest::with_game()?;

    let output = test.patch_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(!test.root().join("chinese.table").exists());

    Ok(())
}

#[test]
fn test_patch_empty_table_file() -> Result<()> {
    let test = CliTest::with_game()?;
    test.write_file("chinese.table", "")?;

    let output = test.patch_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(test.read_file("chinese.table")?.contains("\"Prefix\""));
    assert!(test.table_rows()?.is_empty());

    Ok(())
}
