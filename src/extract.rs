//! Declaration classification - one file to six ordered category lists.
//!
//! Walks a file's top-level declarations in source order and buckets each
//! rendered fragment into its category. The dispatch is an exhaustive
//! match over the closed declaration enum, so adding a kind without a
//! bucket fails at compile time. Total over arbitrary input: an empty
//! file (or one whose source held only imports) yields six empty lists.

use crate::format;
use crate::oracle::TypeOracle;
use crate::types::{AnalyzedFile, DeclarationNode};

/// Rendered declarations for one file, grouped by category.
/// Category order is fixed and matches the assembled section order.
#[derive(Debug, Default, Clone)]
pub struct FileDeclarations {
    pub classes: Vec<String>,
    pub interfaces: Vec<String>,
    pub types: Vec<String>,
    pub functions: Vec<String>,
    pub enums: Vec<String>,
    pub variables: Vec<String>,
}

impl FileDeclarations {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.interfaces.is_empty()
            && self.types.is_empty()
            && self.functions.is_empty()
            && self.enums.is_empty()
            && self.variables.is_empty()
    }
}

/// Classify and render every top-level declaration of one file.
///
/// Empty render results are dropped rather than producing blank entries;
/// a variable statement may contribute zero, one, or several entries.
pub fn extract_declarations(file: &AnalyzedFile, oracle: &dyn TypeOracle) -> FileDeclarations {
    let mut out = FileDeclarations::default();

    for node in &file.nodes {
        match node {
            DeclarationNode::Class(decl) => {
                out.classes.push(format::format_class(decl, oracle));
            }
            DeclarationNode::Interface(decl) => {
                out.interfaces.push(format::format_interface(decl, oracle));
            }
            DeclarationNode::TypeAlias(decl) => {
                out.types.push(format::format_type_alias(decl, oracle));
            }
            DeclarationNode::Function(decl) => {
                if let Some(text) = format::format_function(decl, oracle) {
                    out.functions.push(text);
                }
            }
            DeclarationNode::Enum(decl) => {
                out.enums.push(format::format_enum(decl));
            }
            DeclarationNode::Variable(decl) => {
                out.variables.extend(format::format_variable(decl, oracle));
            }
        }
    }

    out
}
