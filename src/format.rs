//! Signature rendering - one declaration node to one text fragment.
//!
//! All functions here are pure: declaration + oracle in, text out. They
//! never fail for structurally valid nodes; unresolved types surface as
//! the oracle's fallback marker, and members without a resolvable
//! signature are skipped silently. Rendering one declaration never looks
//! at any other declaration.
//!
//! Output grammar (one entry per declaration):
//!
//! ```text
//! Class: UserManager
//!   Properties:
//!   - users: User[]
//!   Methods:
//!   - addUser(user: User): void
//! ```

use crate::oracle::TypeOracle;
use crate::types::{
    Binding, ClassDecl, EnumDecl, FunctionDecl, InterfaceDecl, MemberKind, TypeAliasDecl,
    VariableDecl,
};

/// Placeholder name for anonymous classes.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Render `<T, U>` for a generic parameter list, or nothing when empty.
fn format_type_params(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

/// Render a class header with optional `Properties:` and `Methods:`
/// blocks. Either block is omitted entirely when empty - never rendered
/// as an empty header. Methods without a resolvable signature are
/// skipped.
pub fn format_class(decl: &ClassDecl, oracle: &dyn TypeOracle) -> String {
    let name = decl.name.as_deref().unwrap_or(ANONYMOUS_NAME);
    let mut text = format!("Class: {}{}", name, format_type_params(&decl.type_params));

    let mut properties = Vec::new();
    let mut methods = Vec::new();

    for member in &decl.members {
        match member.kind {
            MemberKind::Property => {
                properties.push(format!("  - {}: {}", member.name, oracle.type_of(member.node)));
            }
            MemberKind::Method => {
                if let Some(sig) = oracle.signature_of(member.node) {
                    methods.push(format!(
                        "  - {}({}): {}",
                        member.name,
                        sig.params_text(),
                        sig.return_type
                    ));
                }
            }
        }
    }

    if !properties.is_empty() {
        text.push_str("\n  Properties:\n");
        text.push_str(&properties.join("\n"));
    }
    if !methods.is_empty() {
        text.push_str("\n  Methods:\n");
        text.push_str(&methods.join("\n"));
    }
    text
}

/// Render an interface header with an optional `Properties:` block.
pub fn format_interface(decl: &InterfaceDecl, oracle: &dyn TypeOracle) -> String {
    let mut text = format!(
        "Interface: {}{}",
        decl.name,
        format_type_params(&decl.type_params)
    );

    let properties: Vec<String> = decl
        .properties
        .iter()
        .map(|prop| format!("  - {}: {}", prop.name, oracle.type_of(prop.node)))
        .collect();

    if !properties.is_empty() {
        text.push_str("\n  Properties:\n");
        text.push_str(&properties.join("\n"));
    }
    text
}

/// Render `- type Name = <aliased type>`.
pub fn format_type_alias(decl: &TypeAliasDecl, oracle: &dyn TypeOracle) -> String {
    format!("- type {} = {}", decl.name, oracle.type_of(decl.node))
}

/// Render `- function name<T>(params): return`, or `None` when the
/// declaration has no resolvable call signature.
pub fn format_function(decl: &FunctionDecl, oracle: &dyn TypeOracle) -> Option<String> {
    let sig = oracle.signature_of(decl.node)?;
    Some(format!(
        "- function {}{}({}): {}",
        decl.name,
        format_type_params(&decl.type_params),
        sig.params_text(),
        sig.return_type
    ))
}

/// Render an enum header with a `Cases:` block of bare member names.
/// Member values are never rendered.
pub fn format_enum(decl: &EnumDecl) -> String {
    let cases: Vec<String> = decl.members.iter().map(|m| format!("  - {}", m)).collect();
    format!("Enum: {}\n  Cases:\n{}", decl.name, cases.join("\n"))
}

/// Render `- const name: type` for each simple identifier binding in a
/// variable statement. Destructuring bindings yield nothing.
pub fn format_variable(decl: &VariableDecl, oracle: &dyn TypeOracle) -> Vec<String> {
    decl.bindings
        .iter()
        .filter_map(|binding| match binding {
            Binding::Named { name, node } => {
                Some(format!("- const {}: {}", name, oracle.type_of(*node)))
            }
            Binding::Destructured => None,
        })
        .collect()
}
