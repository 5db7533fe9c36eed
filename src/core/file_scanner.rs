use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths relative to the scan root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Matching script files, sorted by path.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// What to scan and what to leave out.
pub struct ScanOptions<'a> {
    /// File extensions to keep, without the leading dot.
    pub extensions: &'a [String],
    /// Config `ignores`: glob patterns or literal paths relative to `base_dir`.
    pub ignore_patterns: &'a [String],
    /// Directories pruned from the walk (e.g. the translation tree).
    pub exclude_dirs: &'a [PathBuf],
    pub verbose: bool,
}

/// Recursively collect script files under `base_dir`.
pub fn scan_files(base_dir: &Path, options: &ScanOptions<'_>) -> ScanResult {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = options.exclude_dirs.to_vec();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in options.ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if options.verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let walker = WalkDir::new(base_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !literal_ignore_paths
                .iter()
                .any(|ignore_path| entry.path().starts_with(ignore_path))
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if options.verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();

        if glob_patterns
            .iter()
            .any(|p| p.matches(&path.to_string_lossy()))
        {
            continue;
        }

        if entry.file_type().is_file() && is_script_file(path, options.extensions) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}

fn is_script_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
