use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Result of scanning files.
pub struct ScanResult {
    /// Matching files relative to the root, `/`-separated, sorted.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// A compiled include or ignore rule.
enum Rule {
    Glob(Pattern),
    Literal(PathBuf),
}

impl Rule {
    fn new(pattern: &str) -> Option<Self> {
        if !is_glob_pattern(pattern) {
            return Some(Rule::Literal(PathBuf::from(pattern)));
        }
        match Pattern::new(pattern) {
            Ok(pattern) => Some(Rule::Glob(pattern)),
            Err(e) => {
                tracing::warn!(pattern, error = %e, "invalid glob pattern");
                None
            }
        }
    }

    fn matches(&self, relative: &str) -> bool {
        match self {
            Rule::Literal(path) => Path::new(relative).starts_with(path),
            // `**/` also matches files at the root
            Rule::Glob(pattern) => {
                pattern.matches_with(relative, MATCH_OPTIONS)
                    || pattern
                        .as_str()
                        .strip_prefix("**/")
                        .and_then(|rest| Pattern::new(rest).ok())
                        .is_some_and(|rest| rest.matches_with(relative, MATCH_OPTIONS))
            }
        }
    }
}

/// Collect resource files under `base_dir`.
///
/// A file is kept when it matches one of `includes` and none of `ignores`;
/// `.git` directories and any path in `exclude` (e.g. the setter config
/// file) are never returned.
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignores: &[String],
    exclude: &[PathBuf],
) -> ScanResult {
    let includes: Vec<Rule> = includes.iter().filter_map(|p| Rule::new(p)).collect();
    let ignores: Vec<Rule> = ignores.iter().filter_map(|p| Rule::new(p)).collect();
    let exclude: Vec<PathBuf> = exclude
        .iter()
        .map(|path| path.canonicalize().unwrap_or_else(|_| path.clone()))
        .collect();

    let mut files = Vec::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(base_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!(error = %e, "cannot access path");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(base_dir) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if !includes.iter().any(|rule| rule.matches(&relative)) {
            continue;
        }
        if ignores.iter().any(|rule| rule.matches(&relative)) {
            continue;
        }
        if !exclude.is_empty() {
            let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
            if exclude.contains(&canonical) {
                continue;
            }
        }

        files.push(relative);
    }

    ScanResult {
        files,
        skipped_count,
    }
}
