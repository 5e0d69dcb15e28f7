//! Shared setup for `create` and `list`: configuration, setter registry and
//! resource loading.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::cli::args::CommonArgs;
use crate::config::{Config, load_config};
use crate::core::{InputError, SetterError, SetterRegistry};
use crate::document::{SourceFile, parse_documents, scanner::scan_files};

/// A file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: String,
    pub message: String,
}

/// Resource files of a package, parsed and ready to be walked.
pub struct LoadedFiles {
    pub files: Vec<SourceFile>,
    pub failures: Vec<FileFailure>,
    /// Paths the directory walk could not access.
    pub skipped_count: usize,
}

impl LoadedFiles {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || self.skipped_count > 0
    }
}

/// The package directory with its effective configuration.
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
    pub setters_path: PathBuf,
}

impl Workspace {
    /// Resolve the package root and configuration.
    ///
    /// Priority: CLI args > config file > defaults. A `settersFile` from the
    /// config file is relative to the package root.
    pub fn load(common: &CommonArgs) -> Result<Self> {
        let root = common.path.clone();
        if !root.is_dir() {
            anyhow::bail!("Package path is not a directory: {}", root.display());
        }

        let loaded = load_config(&root)?;
        let setters_path = match &common.setters {
            Some(path) => path.clone(),
            None => root.join(&loaded.config.setters_file),
        };

        Ok(Self {
            root,
            config: loaded.config,
            setters_path,
        })
    }

    /// Read and decode the setter config file.
    ///
    /// An empty file yields an empty registry.
    pub fn load_registry(&self) -> Result<SetterRegistry> {
        load_registry(&self.setters_path)
    }

    /// Discover and parse every resource file.
    pub fn load_files(&self) -> LoadedFiles {
        let scan = scan_files(
            &self.root,
            &self.config.includes,
            &self.config.ignores,
            std::slice::from_ref(&self.setters_path),
        );

        let mut files = Vec::new();
        let mut failures = Vec::new();
        for relative in scan.files {
            let content = match fs::read_to_string(self.root.join(&relative)) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(file = %relative, error = %e, "cannot read file");
                    failures.push(FileFailure {
                        path: relative,
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            match SourceFile::parse(relative.clone(), content) {
                Ok(file) => files.push(file),
                Err(e) => {
                    tracing::warn!(file = %relative, error = %e, "cannot parse file");
                    failures.push(FileFailure {
                        path: relative,
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(files = files.len(), failures = failures.len(), "loaded resources");
        LoadedFiles {
            files,
            failures,
            skipped_count: scan.skipped_count,
        }
    }
}

pub fn load_registry(path: &Path) -> Result<SetterRegistry> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read setter config: {}", path.display()))?;
    let documents = parse_documents(&content, &path.to_string_lossy())
        .with_context(|| format!("Failed to parse setter config: {}", path.display()))?;
    let registry = match documents.first() {
        Some(doc) => SetterRegistry::decode(doc)?,
        None => SetterRegistry::new(),
    };
    tracing::debug!(
        scalars = registry.scalars().len(),
        lists = registry.lists().len(),
        "loaded setters"
    );
    Ok(registry)
}

/// Fail fast when there is nothing to annotate or list with.
pub fn ensure_setters(registry: &SetterRegistry) -> Result<()> {
    if registry.is_empty() {
        return Err(SetterError::from(InputError::EmptyRegistry).into());
    }
    Ok(())
}

/// Write `content` to `root/relative`.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    fs::write(&path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
