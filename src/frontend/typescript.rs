//! Tree-sitter based TypeScript parsing.
//!
//! Walks the AST of one source file and produces the closed declaration
//! enum plus oracle table entries. Resolution is syntactic: type
//! annotations are taken as written, unannotated `const` initializers get
//! literal inference, and everything else falls back to the oracle's
//! `any` marker. Imports, expression statements, and unsupported syntax
//! are ignored without error.

use std::path::Path;

use anyhow::{Context, Result};
use tree_sitter::{Language, Node, Parser};

use crate::oracle::{CallSignature, TableOracle, UNRESOLVED_TYPE};
use crate::types::{
    Binding, ClassDecl, ClassMember, DeclarationNode, EnumDecl, FunctionDecl, InterfaceDecl,
    MemberKind, NodeId, PropertySignature, TypeAliasDecl, VariableDecl,
};

/// Hands out oracle node handles, unique across the whole run.
#[derive(Debug, Default)]
pub struct NodeIdAllocator {
    next: u32,
}

impl NodeIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// TypeScript parser wrapping tree-sitter with the TS and TSX grammars.
pub struct SourceParser {
    parser: Parser,
    ts: Language,
    tsx: Language,
}

impl SourceParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: Parser::new(),
            ts: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
        })
    }

    /// Parse one file's content into top-level declarations, filling the
    /// oracle tables as a side product. Parse failures yield an empty
    /// list; tree-sitter's error recovery still salvages well-formed
    /// declarations from partially broken files.
    pub fn parse_source(
        &mut self,
        content: &str,
        path: &Path,
        ids: &mut NodeIdAllocator,
        oracle: &mut TableOracle,
    ) -> Vec<DeclarationNode> {
        let language = if path.extension().and_then(|e| e.to_str()) == Some("tsx") {
            &self.tsx
        } else {
            &self.ts
        };
        if self.parser.set_language(language).is_err() {
            return Vec::new();
        }

        let tree = match self.parser.parse(content, None) {
            Some(t) => t,
            None => return Vec::new(),
        };

        let extractor = Extractor {
            src: content.as_bytes(),
        };
        let mut nodes = Vec::new();
        let root = tree.root_node();
        let mut cursor = root.walk();
        for statement in root.named_children(&mut cursor) {
            if let Some(decl) = extractor.statement(statement, ids, oracle) {
                nodes.push(decl);
            }
        }
        nodes
    }
}

/// One-file extraction context holding the source bytes.
struct Extractor<'a> {
    src: &'a [u8],
}

impl<'a> Extractor<'a> {
    fn text(&self, node: Node) -> String {
        node.utf8_text(self.src).unwrap_or("").to_string()
    }

    /// Classify one top-level statement. Returns `None` for anything
    /// that is not a supported declaration kind (imports, expression
    /// statements, ambient declarations, ...).
    fn statement(
        &self,
        node: Node,
        ids: &mut NodeIdAllocator,
        oracle: &mut TableOracle,
    ) -> Option<DeclarationNode> {
        match node.kind() {
            "export_statement" => {
                if let Some(inner) = node.child_by_field_name("declaration") {
                    return self.statement(inner, ids, oracle);
                }
                // `export default class {}` carries the class as an
                // expression, not a declaration field.
                let mut cursor = node.walk();
                let class_expr = node
                    .named_children(&mut cursor)
                    .find(|c| c.kind() == "class");
                class_expr.map(|c| DeclarationNode::Class(self.class_decl(c, ids, oracle)))
            }
            "class_declaration" | "abstract_class_declaration" => {
                Some(DeclarationNode::Class(self.class_decl(node, ids, oracle)))
            }
            "interface_declaration" => {
                Some(DeclarationNode::Interface(self.interface(node, ids, oracle)))
            }
            "type_alias_declaration" => {
                Some(DeclarationNode::TypeAlias(self.type_alias(node, ids, oracle)))
            }
            "function_declaration" | "generator_function_declaration" => {
                self.function(node, ids, oracle).map(DeclarationNode::Function)
            }
            "enum_declaration" => Some(DeclarationNode::Enum(self.enumeration(node))),
            "lexical_declaration" | "variable_declaration" => {
                Some(DeclarationNode::Variable(self.variable(node, ids, oracle)))
            }
            _ => None,
        }
    }

    fn class_decl(
        &self,
        node: Node,
        ids: &mut NodeIdAllocator,
        oracle: &mut TableOracle,
    ) -> ClassDecl {
        let name = node.child_by_field_name("name").map(|n| self.text(n));
        let type_params = self.type_params(node);
        let mut members = Vec::new();

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                match member.kind() {
                    "public_field_definition" => {
                        let Some(name_node) = member.child_by_field_name("name") else {
                            continue;
                        };
                        let id = ids.alloc();
                        if let Some(typ) = self.declared_or_inferred_type(member) {
                            oracle.insert_type(id, typ);
                        }
                        members.push(ClassMember {
                            name: self.text(name_node),
                            kind: MemberKind::Property,
                            node: id,
                        });
                    }
                    "method_definition" | "abstract_method_signature" => {
                        let Some(name_node) = member.child_by_field_name("name") else {
                            continue;
                        };
                        let name = self.text(name_node);
                        // Constructors and get/set accessors are not part
                        // of the rendered method surface.
                        if name == "constructor" || is_accessor(member) {
                            continue;
                        }
                        let id = ids.alloc();
                        oracle.insert_signature(id, self.call_signature(member));
                        members.push(ClassMember {
                            name,
                            kind: MemberKind::Method,
                            node: id,
                        });
                    }
                    _ => {}
                }
            }
        }

        ClassDecl {
            name,
            type_params,
            members,
        }
    }

    fn interface(
        &self,
        node: Node,
        ids: &mut NodeIdAllocator,
        oracle: &mut TableOracle,
    ) -> InterfaceDecl {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or_default();
        let type_params = self.type_params(node);
        let mut properties = Vec::new();

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                if member.kind() != "property_signature" {
                    continue;
                }
                let Some(name_node) = member.child_by_field_name("name") else {
                    continue;
                };
                let id = ids.alloc();
                if let Some(typ) = self.annotated_type(member) {
                    oracle.insert_type(id, typ);
                }
                properties.push(PropertySignature {
                    name: self.text(name_node),
                    node: id,
                });
            }
        }

        InterfaceDecl {
            name,
            type_params,
            properties,
        }
    }

    fn type_alias(
        &self,
        node: Node,
        ids: &mut NodeIdAllocator,
        oracle: &mut TableOracle,
    ) -> TypeAliasDecl {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or_default();
        let id = ids.alloc();
        if let Some(value) = node.child_by_field_name("value") {
            oracle.insert_type(id, normalize_type_text(&self.text(value)));
        }
        TypeAliasDecl { name, node: id }
    }

    /// Anonymous function declarations (`export default function () {}`)
    /// have no map entry, matching the renderer's drop semantics.
    fn function(
        &self,
        node: Node,
        ids: &mut NodeIdAllocator,
        oracle: &mut TableOracle,
    ) -> Option<FunctionDecl> {
        let name = node.child_by_field_name("name").map(|n| self.text(n))?;
        let id = ids.alloc();
        oracle.insert_signature(id, self.call_signature(node));
        Some(FunctionDecl {
            name,
            type_params: self.type_params(node),
            node: id,
        })
    }

    fn enumeration(&self, node: Node) -> EnumDecl {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or_default();
        let mut members = Vec::new();

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                match member.kind() {
                    "enum_assignment" => {
                        if let Some(name_node) = member.child_by_field_name("name") {
                            members.push(self.text(name_node));
                        }
                    }
                    "property_identifier" | "string" => {
                        members.push(self.text(member));
                    }
                    _ => {}
                }
            }
        }

        EnumDecl { name, members }
    }

    fn variable(
        &self,
        node: Node,
        ids: &mut NodeIdAllocator,
        oracle: &mut TableOracle,
    ) -> VariableDecl {
        let mut bindings = Vec::new();
        let mut cursor = node.walk();
        for declarator in node.named_children(&mut cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            if name_node.kind() != "identifier" {
                bindings.push(Binding::Destructured);
                continue;
            }
            let id = ids.alloc();
            if let Some(typ) = self.declared_or_inferred_type(declarator) {
                oracle.insert_type(id, typ);
            }
            bindings.push(Binding::Named {
                name: self.text(name_node),
                node: id,
            });
        }
        VariableDecl { bindings }
    }

    /// Generic parameter names from a `type_parameters` field.
    fn type_params(&self, node: Node) -> Vec<String> {
        let Some(params) = node.child_by_field_name("type_parameters") else {
            return Vec::new();
        };
        let mut cursor = params.walk();
        params
            .named_children(&mut cursor)
            .filter(|p| p.kind() == "type_parameter")
            .filter_map(|p| p.child_by_field_name("name").map(|n| self.text(n)))
            .collect()
    }

    /// Type from an explicit `: T` annotation on the node, if present.
    fn annotated_type(&self, node: Node) -> Option<String> {
        let annotation = node.child_by_field_name("type")?;
        // type_annotation wraps the actual type node after the colon.
        let inner = annotation.named_child(0)?;
        Some(normalize_type_text(&self.text(inner)))
    }

    /// Annotation if present, otherwise literal inference from the
    /// initializer. `None` leaves the oracle on its `any` fallback.
    fn declared_or_inferred_type(&self, node: Node) -> Option<String> {
        if let Some(typ) = self.annotated_type(node) {
            return Some(typ);
        }
        let value = node.child_by_field_name("value")?;
        self.infer_literal_type(value)
    }

    fn infer_literal_type(&self, value: Node) -> Option<String> {
        match value.kind() {
            "string" | "template_string" => Some("string".into()),
            "number" => Some("number".into()),
            "true" | "false" => Some("boolean".into()),
            "arrow_function" | "function_expression" => {
                let sig = self.call_signature(value);
                Some(format!("({}) => {}", sig.params_text(), sig.return_type))
            }
            _ => None,
        }
    }

    /// Build a call signature from a callable node's `parameters` and
    /// `return_type` fields. Unannotated parts resolve to `any`.
    fn call_signature(&self, node: Node) -> CallSignature {
        let mut params = Vec::new();
        if let Some(param_list) = node.child_by_field_name("parameters") {
            let mut cursor = param_list.walk();
            for param in param_list.named_children(&mut cursor) {
                if !matches!(param.kind(), "required_parameter" | "optional_parameter") {
                    continue;
                }
                let Some(pattern) = param.child_by_field_name("pattern") else {
                    continue;
                };
                let name = self.text(pattern);
                let typ = self
                    .annotated_type(param)
                    .unwrap_or_else(|| UNRESOLVED_TYPE.to_string());
                params.push((name, typ));
            }
        }

        let return_type = node
            .child_by_field_name("return_type")
            .and_then(|annotation| annotation.named_child(0))
            .map(|inner| normalize_type_text(&self.text(inner)))
            .unwrap_or_else(|| UNRESOLVED_TYPE.to_string());

        CallSignature {
            params,
            return_type,
        }
    }
}

/// Getter/setter definitions carry a bare `get`/`set` token before the
/// member name. A method actually named `get` shows up as a
/// `property_identifier` instead, so the token check is unambiguous.
fn is_accessor(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| matches!(c.kind(), "get" | "set"));
    found
}

/// Collapse whitespace runs in a type's source text so multi-line
/// annotations render on one line. Content inside quoted literal types
/// (`'a  b'`) is preserved verbatim.
fn normalize_type_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut pending_space = false;

    for ch in text.chars() {
        match quote {
            Some(q) => {
                out.push(ch);
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
            }
            None => {
                if ch.is_whitespace() {
                    pending_space = true;
                    continue;
                }
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                if matches!(ch, '\'' | '"' | '`') {
                    quote = Some(ch);
                }
                out.push(ch);
            }
        }
    }
    out
}

impl std::fmt::Debug for SourceParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceParser").finish_non_exhaustive()
    }
}

/// Convenience wrapper for one-shot parsing, used by tests.
pub fn parse_str(
    content: &str,
    ids: &mut NodeIdAllocator,
    oracle: &mut TableOracle,
) -> Result<Vec<DeclarationNode>> {
    let mut parser = SourceParser::new().context("failed to initialize parser")?;
    Ok(parser.parse_source(content, Path::new("test.ts"), ids, oracle))
}
