use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod export;
mod import;
mod init;
mod patch;

const BIN_NAME: &str = "tlbridge";

/// Translation script used by most tests: two dialogue blocks and a strings block.
pub const CHINESE_SCRIPT: &str = r#"# game/script.rpy:3
translate chinese start_1:

    # e "Hello"
    e "你好"

# game/script.rpy:5
translate chinese start_2:

    # e "Welcome"
    e "欢迎"

translate chinese strings:

    # game/screens.rpy:8
    old "Start"
    new "开始"
"#;

/// Original script matching `CHINESE_SCRIPT`.
pub const ORIGINAL_SCRIPT: &str = r#"label start:
    if seen_intro:
        e "Hello"
    else:
        e "Welcome"
    return
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// A project with one original script and its Chinese translation.
    pub fn with_game() -> Result<Self> {
        let test = Self::with_file("game/tl/chinese/script.rpy", CHINESE_SCRIPT)?;
        test.write_file("game/script.rpy", ORIGINAL_SCRIPT)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("TLBRIDGE_DISABLE_TIMING", "1"); // Disable timing for stable output
        cmd
    }

    fn language_command(&self, name: &str) -> Command {
        let mut cmd = self.command();
        cmd.args([name, "--language", "chinese"]);
        cmd
    }

    pub fn export_command(&self) -> Command {
        self.language_command("export")
    }

    pub fn patch_command(&self) -> Command {
        self.language_command("patch")
    }

    pub fn import_command(&self) -> Command {
        self.language_command("import")
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    /// Data rows of `chinese.table`, header excluded.
    pub fn table_rows(&self) -> Result<Vec<Vec<String>>> {
        let content = self.read_file("chinese.table")?;
        let parsed: Vec<Vec<Value>> =
            serde_json::from_str(&content).context("Table should be a JSON array of rows")?;
        Ok(parsed
            .into_iter()
            .skip(1)
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .collect())
    }
}

pub fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
