//! codemap - declaration-surface cartography for TypeScript projects.
//!
//! Produces a compact, LLM-readable document summarizing the public
//! declaration surface of a source tree: every class, interface, type
//! alias, enum, function, and top-level constant binding, annotated with
//! its resolved type signature, preceded by a directory tree of the
//! analyzed files.
//!
//! # Architecture
//!
//! ```text
//! Config → Discovery → Frontend → Classifier → Assembler → Output
//!    ↓         ↓           ↓           ↓            ↓         ↓
//! tsconfig  ignore    tree-sitter  exhaustive   file tree   single
//!  .json    crate      + oracle      match      + sections   write
//! ```
//!
//! The extraction core (format/extract/tree/output) is pure and oracle-
//! driven: it renders whatever the injected [`oracle::TypeOracle`]
//! resolves, never touching the filesystem or failing on odd input.
//! The boundary layers (config, discovery, frontend, CLI) own all I/O
//! and surface fatal errors before the core runs.

pub mod config;
pub mod discovery;
pub mod extract;
pub mod format;
pub mod frontend;
pub mod oracle;
pub mod output;
pub mod tree;
pub mod types;

// Re-export the core surface
pub use extract::{extract_declarations, FileDeclarations};
pub use oracle::{CallSignature, TableOracle, TypeOracle};
pub use output::{generate_codemap, write_output};
pub use tree::FileTree;
pub use types::{AnalyzedFile, DeclarationNode, NodeId, Program};
