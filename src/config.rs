use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".tlbridgerc.json";

/// Extension of the table file written next to the project root.
pub const TABLE_EXTENSION: &str = "table";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Target language; `--language` overrides it.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_game_dir")]
    pub game_dir: String,
    #[serde(default = "default_tl_dir")]
    pub tl_dir: String,
    #[serde(default = "default_script_extensions")]
    pub script_extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_game_dir() -> String {
    "game".to_string()
}

fn default_tl_dir() -> String {
    "tl".to_string()
}

fn default_script_extensions() -> Vec<String> {
    ["script", "rpy"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            game_dir: default_game_dir(),
            tl_dir: default_tl_dir(),
            script_extensions: default_script_extensions(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, an empty
    /// extension list, or directory names that are not plain relative paths.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.script_extensions.is_empty() {
            bail!("'scriptExtensions' must list at least one extension");
        }
        if let Some(ext) = self
            .script_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            bail!(
                "Invalid extension in 'scriptExtensions': \"{}\" (omit the leading dot)",
                ext
            );
        }

        for (name, dir) in [("gameDir", &self.game_dir), ("tlDir", &self.tl_dir)] {
            if dir.is_empty() || Path::new(dir).is_absolute() {
                bail!("'{}' must be a relative directory, got \"{}\"", name, dir);
            }
        }

        if let Some(language) = &self.language
            && !is_language_name(language)
        {
            bail!("Invalid language in config: \"{}\"", language);
        }

        Ok(())
    }
}

/// Language names are single words: `chinese`, `pt_br`.
pub fn is_language_name(language: &str) -> bool {
    !language.is_empty() && language.chars().all(|c| c.is_alphanumeric() || c == '_')
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
