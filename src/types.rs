//! Core types for codemap - the declaration-surface cartographer.
//!
//! The data model mirrors the top-level declaration kinds of a TypeScript
//! source file, reduced to what the map renders. Key design decisions:
//! - A closed enum over declaration kinds so classifier dispatch is an
//!   exhaustive `match`, not a chain of runtime predicates
//! - Nodes carry opaque `NodeId` handles instead of type strings; resolution
//!   goes through the injected [`TypeOracle`](crate::oracle::TypeOracle)
//! - Frozen/immutable after the frontend builds them

use std::path::PathBuf;

/// Opaque handle tying a declaration (or member) to the oracle's
/// resolution tables. Allocated by the frontend, meaningless on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A top-level declaration in one source file.
///
/// Closed variant set - every supported declaration kind maps to exactly
/// one arm, and the classifier matches exhaustively over all six.
#[derive(Debug, Clone)]
pub enum DeclarationNode {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
    Function(FunctionDecl),
    Enum(EnumDecl),
    Variable(VariableDecl),
}

/// Class declaration with its property and method members.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    /// Class name. `None` for anonymous classes (e.g. `export default
    /// class {}`) - rendered with a fixed placeholder.
    pub name: Option<String>,
    /// Generic parameter names, in declaration order.
    pub type_params: Vec<String>,
    /// Members in source order. Only properties and methods are captured.
    pub members: Vec<ClassMember>,
}

/// One class member - a property with a resolvable type, or a method with
/// a resolvable call signature.
#[derive(Debug, Clone)]
pub struct ClassMember {
    pub name: String,
    pub kind: MemberKind,
    pub node: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Method,
}

/// Interface declaration. Only property signatures are captured.
#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub properties: Vec<PropertySignature>,
}

/// A named property signature inside an interface body.
#[derive(Debug, Clone)]
pub struct PropertySignature {
    pub name: String,
    pub node: NodeId,
}

/// Type alias declaration. The `node` resolves to the aliased type string.
#[derive(Debug, Clone)]
pub struct TypeAliasDecl {
    pub name: String,
    pub node: NodeId,
}

/// Top-level function declaration. The `node` resolves to a call
/// signature; declarations without one render to nothing.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub node: NodeId,
}

/// Enum declaration. Member values are never rendered, only names.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<String>,
}

/// One variable statement (`const a = 1, b = 2;`), possibly carrying
/// multiple bindings. Each binding yields at most one map entry.
#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub bindings: Vec<Binding>,
}

/// A single declarator inside a variable statement.
#[derive(Debug, Clone)]
pub enum Binding {
    /// Simple identifier binding - rendered as `const name: type`.
    Named { name: String, node: NodeId },
    /// Array/object destructuring pattern - skipped by the renderer.
    Destructured,
}

/// One analyzed source unit: relative path plus its top-level
/// declarations, in source order. Read-only to the core.
#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    /// Path relative to the analysis root.
    pub rel_path: PathBuf,
    /// True for pure type-declaration files (`.d.ts`) - excluded from the
    /// assembled map entirely.
    pub declaration_file: bool,
    pub nodes: Vec<DeclarationNode>,
}

impl AnalyzedFile {
    pub fn new(rel_path: impl Into<PathBuf>) -> Self {
        let rel_path = rel_path.into();
        let declaration_file = is_declaration_path(&rel_path);
        Self {
            rel_path,
            declaration_file,
            nodes: Vec::new(),
        }
    }
}

/// Check whether a path names a pure type-declaration file.
pub fn is_declaration_path(path: &std::path::Path) -> bool {
    match path.file_name().map(|n| n.to_string_lossy()) {
        Some(n) => n.ends_with(".d.ts") || n.ends_with(".d.mts") || n.ends_with(".d.cts"),
        None => false,
    }
}

/// The whole analyzed source set, in the order files were discovered.
/// This ordering flows through to the "Complete Definitions" listing.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub files: Vec<AnalyzedFile>,
}

impl Program {
    /// Files that participate in the map (declaration files excluded).
    pub fn analyzable_files(&self) -> impl Iterator<Item = &AnalyzedFile> {
        self.files.iter().filter(|f| !f.declaration_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_declaration_path_detection() {
        assert!(is_declaration_path(Path::new("lib/global.d.ts")));
        assert!(is_declaration_path(Path::new("types.d.mts")));
        assert!(is_declaration_path(Path::new("types.d.cts")));
        assert!(!is_declaration_path(Path::new("src/main.ts")));
        assert!(!is_declaration_path(Path::new("d.ts.bak")));
    }

    #[test]
    fn test_analyzed_file_flags_declaration_files() {
        assert!(AnalyzedFile::new("global.d.ts").declaration_file);
        assert!(!AnalyzedFile::new("main.ts").declaration_file);
    }

    #[test]
    fn test_program_filters_declaration_files() {
        let program = Program {
            files: vec![
                AnalyzedFile::new("src/app.ts"),
                AnalyzedFile::new("src/global.d.ts"),
                AnalyzedFile::new("src/util.ts"),
            ],
        };
        let paths: Vec<_> = program
            .analyzable_files()
            .map(|f| f.rel_path.clone())
            .collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("src/app.ts"), PathBuf::from("src/util.ts")]
        );
    }
}
