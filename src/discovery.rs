//! Git-aware discovery of TypeScript source files.
//!
//! Walks the analysis root with the `ignore` crate (the .gitignore
//! handling from ripgrep), keeps TypeScript sources, applies the
//! tsconfig include/exclude patterns against root-relative paths, and
//! returns sorted results. Sorting matters: the file order flows through
//! the whole map, and a deterministic walk makes output byte-identical
//! across runs.

use std::path::{Path, PathBuf};

use anyhow::Result;
use ignore::WalkBuilder;

use crate::config::Config;

/// Extensions treated as TypeScript sources. Declaration files (.d.ts)
/// share these extensions; they are flagged later, not filtered here,
/// so the program representation can carry them with the flag set.
const TS_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

/// Find TypeScript source files under the analysis root.
///
/// Returns absolute paths, sorted. Inaccessible entries are skipped
/// silently, matching gitignore-walker conventions.
pub fn find_source_files(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Path does not exist: {}", root.display());
    }

    // threads(0) auto-detects parallelism; require_git(false) keeps the
    // walker working in non-git directories.
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false)
        .follow_links(false)
        .threads(0)
        .build_parallel();

    let files = std::sync::Mutex::new(Vec::new());
    let root_path = root.to_path_buf();

    walker.run(|| {
        Box::new(|entry_result| {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();

                    if !path.is_file() || !is_typescript_source(path) {
                        return ignore::WalkState::Continue;
                    }

                    // Pattern matching happens on root-relative paths.
                    let rel_path = path.strip_prefix(&root_path).unwrap_or(path);
                    if !config.should_include(rel_path) {
                        return ignore::WalkState::Continue;
                    }

                    if let Ok(mut files) = files.lock() {
                        files.push(path.to_path_buf());
                    }
                    ignore::WalkState::Continue
                }
                Err(_) => ignore::WalkState::Continue,
            }
        })
    });

    let mut files = files
        .into_inner()
        .map_err(|_| anyhow::anyhow!("Failed to unwrap mutex"))?;
    files.sort();
    Ok(files)
}

/// Check the extension against the TypeScript source set.
fn is_typescript_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TS_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
