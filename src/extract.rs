//! Declaration extraction from a parsed header.
//!
//! Walks the declaration tree in pre-order, keeping only nodes that
//! physically originate in the header itself so declarations pulled in
//! transitively from other includes never leak into the output.

use serde::{Deserialize, Serialize};

use crate::model::{Function, TypeDefinition};
use crate::parse::ast::{DeclarationTree, NodeKind};

/// Everything extracted from one header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderDeclarations {
    /// Function declarations, in encounter order
    pub functions: Vec<Function>,

    /// Typedef declarations, in encounter order
    pub types: Vec<TypeDefinition>,

    /// Macro constant lines, verbatim
    pub defines: Vec<String>,
}

/// Collect function declarations written in the header itself.
pub fn collect_functions(tree: &DeclarationTree) -> Vec<Function> {
    tree.root()
        .walk_preorder()
        .filter(|node| node.file.as_deref() == Some(tree.path()))
        .filter(|node| node.kind == NodeKind::FunctionDecl)
        .map(Function::from_node)
        .collect()
}

/// Collect typedef declarations written in the header itself.
pub fn collect_types(tree: &DeclarationTree) -> Vec<TypeDefinition> {
    tree.root()
        .walk_preorder()
        .filter(|node| node.file.as_deref() == Some(tree.path()))
        .filter(|node| node.kind == NodeKind::TypedefDecl)
        .map(TypeDefinition::from_node)
        .collect()
}

/// Collect macro constant lines from the raw header text.
///
/// The scan is textual rather than AST-based: macro bodies are not
/// necessarily standalone C expressions a declaration parser resolves
/// uniformly. A line is kept verbatim when, after trimming, it starts
/// with the `#define <prefix>` gate.
pub fn collect_defines(content: &str, prefix: &str) -> Vec<String> {
    let gate = format!("#define {}", prefix);
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(&gate))
        .map(String::from)
        .collect()
}

/// Extract all declarations for one header.
pub fn extract(tree: &DeclarationTree, content: &str, define_prefix: &str) -> HeaderDeclarations {
    HeaderDeclarations {
        functions: collect_functions(tree),
        types: collect_types(tree),
        defines: collect_defines(content, define_prefix),
    }
}
