//! Project configuration from tsconfig.json.
//!
//! The analysis root is an explicit parameter everywhere - the tool never
//! changes or consults the process working directory after startup. A
//! missing or malformed tsconfig.json is a fatal error reported before
//! any analysis runs.
//!
//! Supported fields: `include`, `exclude`, `files`. Patterns are matched
//! against root-relative paths. As in tsc, an explicit `exclude` replaces
//! the defaults (`node_modules` and friends) rather than extending them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default exclude patterns, mirroring tsc's built-in excludes.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules/**",
    "**/node_modules/**",
    "bower_components/**",
    "**/bower_components/**",
    "jspm_packages/**",
    "**/jspm_packages/**",
];

/// Resolved project configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Canonical analysis root (the directory holding tsconfig.json).
    pub root: PathBuf,
    /// Glob patterns for files to include. Empty means include all.
    pub include: Vec<String>,
    /// Glob patterns for files to exclude. Replaces defaults if set.
    pub exclude: Vec<String>,
    /// Explicit file list, always included regardless of patterns.
    pub files: Vec<String>,
}

/// Raw tsconfig.json shape. Unknown fields (compilerOptions etc.) are
/// accepted and ignored - only the file-set fields matter here.
#[derive(Debug, Deserialize, Default)]
struct RawTsConfig {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    files: Option<Vec<String>>,
}

impl Config {
    /// Load tsconfig.json from the analysis root.
    ///
    /// Errors if the file is missing or not valid JSON - both are fatal
    /// configuration errors per the error taxonomy, surfaced verbatim to
    /// the caller.
    pub fn load(root: &Path) -> Result<Self> {
        let tsconfig_path = root.join("tsconfig.json");
        if !tsconfig_path.exists() {
            anyhow::bail!(
                "tsconfig.json not found in {}",
                root.display()
            );
        }

        let content = std::fs::read_to_string(&tsconfig_path)
            .with_context(|| format!("Error reading {}", tsconfig_path.display()))?;
        let raw: RawTsConfig = serde_json::from_str(&content)
            .with_context(|| format!("Error parsing {}", tsconfig_path.display()))?;

        Ok(Self {
            root: root.to_path_buf(),
            include: raw.include.unwrap_or_default(),
            exclude: raw.exclude.unwrap_or_default(),
            files: raw.files.unwrap_or_default(),
        })
    }

    /// Effective exclude patterns: custom exclude if set, defaults
    /// otherwise.
    pub fn effective_excludes(&self) -> Vec<String> {
        if self.exclude.is_empty() {
            DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
        } else {
            self.exclude.clone()
        }
    }

    fn matches_include(&self, path_str: &str) -> bool {
        if self.include.is_empty() {
            return true;
        }
        self.include
            .iter()
            .any(|pattern| glob_match::glob_match(pattern, path_str))
    }

    fn matches_exclude(&self, path_str: &str) -> bool {
        self.effective_excludes()
            .iter()
            .any(|pattern| glob_match::glob_match(pattern, path_str))
    }

    /// Decide whether a root-relative path belongs to the analyzed set.
    /// Entries of `files` are always in; everything else must match the
    /// include patterns and not match the exclude patterns.
    pub fn should_include(&self, rel_path: &Path) -> bool {
        let path_str = rel_path.to_string_lossy();
        if self.files.iter().any(|f| f.as_str() == path_str) {
            return true;
        }
        self.matches_include(&path_str) && !self.matches_exclude(&path_str)
    }
}
