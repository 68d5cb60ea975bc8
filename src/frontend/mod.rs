//! Program representation frontend.
//!
//! Turns discovered source files into the in-memory [`Program`] the core
//! consumes, and fills a [`TableOracle`] with syntactically resolved
//! types while doing so. Files that cannot be read or parsed degrade to
//! empty declaration lists - the frontend never fails a run over one
//! bad file. Pure declaration files are carried with their flag set and
//! their bodies left unparsed.

mod typescript;

pub use typescript::{NodeIdAllocator, SourceParser};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::oracle::TableOracle;
use crate::types::{AnalyzedFile, Program};

/// Parse every discovered file into the program representation.
///
/// `files` are absolute paths; relative paths in the program are computed
/// against `root`. File order is preserved - it becomes the map's file
/// order.
pub fn build_program(root: &Path, files: &[PathBuf]) -> Result<(Program, TableOracle)> {
    let mut parser = SourceParser::new()?;
    let mut ids = NodeIdAllocator::new();
    let mut oracle = TableOracle::new();
    let mut program = Program::default();

    for path in files {
        let rel_path = path.strip_prefix(root).unwrap_or(path);
        let mut analyzed = AnalyzedFile::new(rel_path);

        if !analyzed.declaration_file {
            match fs::read_to_string(path) {
                Ok(content) => {
                    analyzed.nodes =
                        parser.parse_source(&content, path, &mut ids, &mut oracle);
                }
                Err(_) => {
                    // Unreadable file: keep it in the tree, no declarations.
                }
            }
        }

        program.files.push(analyzed);
    }

    Ok((program, oracle))
}
