//! Codemap assembly and the output sink.
//!
//! `generate_codemap` orchestrates one full run over an in-memory
//! program: classify every analyzable file, build the file tree once,
//! and concatenate everything into the final delimited document. The
//! document layout is load-bearing - downstream tooling splits on the
//! exact tags and separators:
//!
//! ```text
//! <file_map>
//! <tree>
//!
//! <Complete Definitions>
//! Path: src/sample.ts
//!
//! ---
//!
//! <file section>
//!
//! ---
//!
//! </file_map>
//! ```
//!
//! Assembly never fails for structurally valid input; the only fallible
//! operation here is the final file write.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::extract::{extract_declarations, FileDeclarations};
use crate::oracle::TypeOracle;
use crate::tree::FileTree;
use crate::types::Program;

/// Fixed category headers, in section order.
const CATEGORY_HEADERS: [&str; 6] = [
    "Classes:",
    "Interfaces:",
    "Types:",
    "Functions:",
    "Enums:",
    "Variables:",
];

/// Build the section body for one file: non-empty categories under their
/// fixed headers, each entry indented two spaces. Empty categories are
/// omitted outright, never rendered as bare headers.
fn build_file_section(decls: &FileDeclarations) -> String {
    let categories: [&[String]; 6] = [
        &decls.classes,
        &decls.interfaces,
        &decls.types,
        &decls.functions,
        &decls.enums,
        &decls.variables,
    ];

    let mut lines = Vec::new();
    for (header, entries) in CATEGORY_HEADERS.iter().zip(categories) {
        if entries.is_empty() {
            continue;
        }
        lines.push((*header).to_string());
        for entry in entries {
            lines.push(format!("  {}", entry));
        }
    }
    lines.join("\n")
}

/// Assemble the complete codemap document for a program.
///
/// Declaration files are excluded from both the tree and the body.
/// Files with no rendered declarations appear in the tree but are
/// skipped in the "Complete Definitions" listing. File order follows
/// the program's own file order. Output is byte-identical across runs
/// on unchanged input.
pub fn generate_codemap(program: &Program, oracle: &dyn TypeOracle) -> String {
    let tree = FileTree::from_paths(program.analyzable_files().map(|f| f.rel_path.as_path()));

    let mut map = String::from("<file_map>\n");
    map.push_str(&tree.render());
    map.push_str("\n\n<Complete Definitions>\n");

    for file in program.analyzable_files() {
        let decls = extract_declarations(file, oracle);
        if decls.is_empty() {
            continue;
        }
        map.push_str(&format!(
            "Path: {}\n\n---\n\n{}\n\n---\n\n",
            file.rel_path.display(),
            build_file_section(&decls)
        ));
    }

    map.push_str("</file_map>");
    map
}

/// Write the assembled document to the output path, overwriting any
/// existing content, and report the destination on success.
pub fn write_output(output_file: &Path, content: &str) -> Result<()> {
    fs::write(output_file, content)
        .with_context(|| format!("Error writing to output file: {}", output_file.display()))?;
    println!("Type map written to {}", output_file.display());
    Ok(())
}
