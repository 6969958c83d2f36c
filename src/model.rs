//! Higher-level entities built from declaration nodes.
//!
//! Each entity is constructed once from its node and never mutated; the
//! synthesizer reads them to produce fragments and they are dropped once
//! their text is captured into the wrangler context. Stringification is
//! explicit per entity rather than hidden behind conversion traits.

use serde::{Deserialize, Serialize};

use crate::gen::format::{merge, normalize};
use crate::gen::render;
use crate::parse::ast::{Node, NodeKind};

/// A function argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name (empty for anonymous parameters)
    pub name: String,

    /// Normalized C type spelling
    #[serde(rename = "type")]
    pub ty: String,
}

impl Argument {
    /// Build an argument from a parameter declaration node.
    pub fn from_node(node: &Node) -> Self {
        Argument {
            name: node.spelling.clone(),
            ty: normalize(&node.type_spelling),
        }
    }

    /// Format the argument as a C declaration fragment.
    pub fn declaration(&self) -> String {
        merge(&self.ty, &self.name)
    }
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Function name
    pub name: String,

    /// Normalized return type spelling
    pub return_type: String,

    /// Arguments in declaration order; this is the call signature
    pub arguments: Vec<Argument>,
}

impl Function {
    /// Build a function from a function declaration node.
    ///
    /// Only immediate parameter-declaration children contribute
    /// arguments; other structural children are skipped.
    pub fn from_node(node: &Node) -> Self {
        let arguments = node
            .children
            .iter()
            .filter(|child| child.kind == NodeKind::ParmDecl)
            .map(Argument::from_node)
            .collect();

        Function {
            name: node.spelling.clone(),
            return_type: normalize(&node.type_spelling),
            arguments,
        }
    }

    /// Format the arguments as a C parameter list.
    pub fn parameter_list(&self, separator: &str) -> String {
        self.arguments
            .iter()
            .map(Argument::declaration)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Format the argument names as a call-forwarding list.
    pub fn argument_names(&self) -> String {
        self.arguments
            .iter()
            .map(|argument| argument.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A type definition (typedef alias).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// The typedef alias
    pub name: String,

    /// Rendered body, referenced type, or canonical underlying spelling
    #[serde(rename = "type")]
    pub ty: String,
}

impl TypeDefinition {
    /// Build a type definition from a typedef declaration node.
    ///
    /// Children are checked in priority order struct, union, enum, then
    /// plain type reference; the first match determines the rendering and
    /// the other paths are not attempted. A typedef with no such child
    /// falls back to the canonical spelling of its underlying type.
    pub fn from_node(node: &Node) -> Self {
        let ty = if let Some(child) = find_child(node, NodeKind::StructDecl) {
            render::render_struct(child)
        } else if let Some(child) = find_child(node, NodeKind::UnionDecl) {
            render::render_union(child)
        } else if let Some(child) = find_child(node, NodeKind::EnumDecl) {
            render::render_enum(child)
        } else if let Some(child) = find_child(node, NodeKind::TypeRef) {
            child.spelling.clone()
        } else {
            normalize(&node.type_spelling)
        };

        TypeDefinition {
            name: node.spelling.clone(),
            ty,
        }
    }

    /// Format as a full typedef statement, without the terminator.
    pub fn declaration(&self) -> String {
        format!("typedef {} {}", self.ty, self.name)
    }
}

fn find_child(node: &Node, kind: NodeKind) -> Option<&Node> {
    node.children.iter().find(|child| child.kind == kind)
}
