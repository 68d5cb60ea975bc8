//! codemap CLI - declaration-surface maps for TypeScript projects.
//!
//! Command-line entry point orchestrating the full pipeline:
//!
//! 1. Configuration: load tsconfig.json from the analysis root
//! 2. File Discovery: find TypeScript sources respecting .gitignore
//! 3. Frontend: parse files into the program representation + oracle
//! 4. Assembly: classify declarations, build the file tree, emit the map
//! 5. Output: write the document to the requested file
//!
//! Design philosophy:
//! - Explicit analysis root, no working-directory tricks
//! - Fail fast with clear error messages before any analysis runs
//! - One output file per invocation, overwritten atomically from memory

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use codemap::config::Config;
use codemap::discovery::find_source_files;
use codemap::frontend::build_program;
use codemap::output::{generate_codemap, write_output};

/// Generate a compact type map of a TypeScript project
///
/// codemap reads the project's tsconfig.json, walks its source files,
/// and writes a single delimited document listing the file tree and
/// every top-level declaration with its resolved signature. The result
/// is made for feeding a language model a structural overview of a
/// codebase without the full source.
///
/// Examples:
///   codemap -o map.txt                  # Map the current directory
///   codemap -r ../app -o app-map.txt    # Map another project
#[derive(Parser, Debug)]
#[command(name = "codemap")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Output file for the type map
    ///
    /// The assembled document is written here in one shot, replacing
    /// any existing content.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Analysis root directory
    ///
    /// Must contain a tsconfig.json. All paths in the map are rendered
    /// relative to this directory.
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Verbose output
    ///
    /// Shows progress messages during execution:
    ///   "Scanning: /path/to/project"
    ///   "Found 42 files"
    ///   "Parsed 42 files"
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(&cli)
}

/// Execute the full codemap pipeline.
fn run(cli: &Cli) -> Result<()> {
    let start = Instant::now();

    let root = cli.root.canonicalize().with_context(|| {
        format!("Failed to resolve root path '{}'", cli.root.display())
    })?;

    // Configuration errors are fatal before any analysis happens.
    let config = Config::load(&root)?;

    if cli.verbose {
        eprintln!("🗺️  codemap v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("📂 Scanning: {}", root.display());
    }

    let files = find_source_files(&root, &config)?;

    if cli.verbose {
        eprintln!("✓ Found {} files ({:.2?})", files.len(), start.elapsed());
    }

    let parse_start = Instant::now();
    let (program, oracle) = build_program(&root, &files)?;

    if cli.verbose {
        let declarations: usize = program.files.iter().map(|f| f.nodes.len()).sum();
        eprintln!(
            "✓ Parsed {} files, {} top-level declarations ({:.2?})",
            program.files.len(),
            declarations,
            parse_start.elapsed()
        );
    }

    let map = generate_codemap(&program, &oracle);
    write_output(&cli.output, &map)?;

    if cli.verbose {
        eprintln!("✓ Total time: {:.2?}", start.elapsed());
    }

    Ok(())
}
