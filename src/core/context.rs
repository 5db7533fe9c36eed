use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, TABLE_EXTENSION, is_language_name, load_config},
    core::file_scanner::{ScanOptions, ScanResult, scan_files},
};

/// Everything a command needs to know about the project it runs on.
///
/// # Configuration Priority
///
/// 1. CLI arguments (`--language`, `--root`)
/// 2. `.tlbridgerc.json` (searched upward from the root)
/// 3. Built-in defaults
pub struct RunContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,
    /// Project root; the game directory and the table live here.
    pub root_dir: PathBuf,
    /// Target language, e.g. `chinese`.
    pub language: String,
    pub verbose: bool,
}

impl RunContext {
    /// Build the context and check that the language directory exists.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid
    /// - No language is given on the command line or in the config
    /// - `<root>/<gameDir>/<tlDir>/<language>` is not a directory
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let mut config = config_result.config;

        if let Some(ref language) = common_args.language {
            config.language = Some(language.clone());
        }
        let Some(language) = config.language.clone() else {
            bail!(
                "No language given: pass --language or set \"language\" in {}",
                CONFIG_FILE_NAME
            );
        };
        if !is_language_name(&language) {
            bail!("Invalid language name: \"{}\"", language);
        }

        let ctx = Self {
            config,
            root_dir,
            language,
            verbose,
        };

        let language_dir = ctx.language_dir();
        if !language_dir.is_dir() {
            bail!("Language directory not found: {}", language_dir.display());
        }

        Ok(ctx)
    }

    /// `<root>/<gameDir>`: the original scripts.
    pub fn game_dir(&self) -> PathBuf {
        self.root_dir.join(&self.config.game_dir)
    }

    /// `<root>/<gameDir>/<tlDir>`: translations for every language.
    pub fn tl_root(&self) -> PathBuf {
        self.game_dir().join(&self.config.tl_dir)
    }

    /// `<root>/<gameDir>/<tlDir>/<language>`.
    pub fn language_dir(&self) -> PathBuf {
        self.tl_root().join(&self.language)
    }

    /// `<root>/<language>.table`.
    pub fn table_path(&self) -> PathBuf {
        self.root_dir
            .join(format!("{}.{}", self.language, TABLE_EXTENSION))
    }

    /// Translation scripts of the target language.
    pub fn translation_files(&self) -> Vec<PathBuf> {
        self.scan(&self.language_dir(), &[])
    }

    /// Original scripts: the game directory without the translation tree.
    pub fn original_files(&self) -> Vec<PathBuf> {
        self.scan(&self.game_dir(), &[self.tl_root()])
    }

    fn scan(&self, dir: &Path, exclude_dirs: &[PathBuf]) -> Vec<PathBuf> {
        let ScanResult {
            files,
            skipped_count,
        } = scan_files(
            dir,
            &ScanOptions {
                extensions: &self.config.script_extensions,
                ignore_patterns: &self.config.ignores,
                exclude_dirs,
                verbose: self.verbose,
            },
        );

        if skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                skipped_count,
                if self.verbose { "" } else { " (use -v for details)" }
            );
        }
        files
    }
}
