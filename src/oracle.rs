//! Type-resolution oracle boundary.
//!
//! The renderer never inspects syntax to learn a type - it asks an oracle.
//! Keeping the oracle behind a trait means the core is testable with
//! canned tables and indifferent to how resolution actually happens
//! (annotation harvesting today, a real checker tomorrow).

use std::collections::HashMap;

use crate::types::NodeId;

/// Fallback type string for nodes the oracle cannot resolve.
/// Matches TypeScript's own unresolved-type marker.
pub const UNRESOLVED_TYPE: &str = "any";

/// Resolved call signature for a function or method node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSignature {
    /// Parameters as (name, type string) pairs, in declaration order.
    pub params: Vec<(String, String)>,
    pub return_type: String,
}

impl CallSignature {
    /// Render the parameter list as `name: type, name: type`.
    pub fn params_text(&self) -> String {
        self.params
            .iter()
            .map(|(name, typ)| format!("{}: {}", name, typ))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Maps declaration nodes to rendered type strings and call signatures.
///
/// Total over any node the program representation produces: unknown nodes
/// resolve to the [`UNRESOLVED_TYPE`] marker rather than erroring.
pub trait TypeOracle {
    /// Rendered type string for a node. Never fails; unresolved types
    /// return the fallback marker.
    fn type_of(&self, node: NodeId) -> String;

    /// Call signature for a callable node, or `None` when the node has no
    /// resolvable signature.
    fn signature_of(&self, node: NodeId) -> Option<CallSignature>;
}

/// Map-backed oracle. The frontend fills it while building the program;
/// tests fill it with canned entries.
#[derive(Debug, Default)]
pub struct TableOracle {
    types: HashMap<NodeId, String>,
    signatures: HashMap<NodeId, CallSignature>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_type(&mut self, node: NodeId, type_string: impl Into<String>) {
        self.types.insert(node, type_string.into());
    }

    pub fn insert_signature(&mut self, node: NodeId, signature: CallSignature) {
        self.signatures.insert(node, signature);
    }
}

impl TypeOracle for TableOracle {
    fn type_of(&self, node: NodeId) -> String {
        self.types
            .get(&node)
            .cloned()
            .unwrap_or_else(|| UNRESOLVED_TYPE.to_string())
    }

    fn signature_of(&self, node: NodeId) -> Option<CallSignature> {
        self.signatures.get(&node).cloned()
    }
}
