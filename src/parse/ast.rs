//! Declaration tree produced by parsing a header.
//!
//! The tree is the narrow contract between a parser backend and the rest
//! of the pipeline: nodes expose a kind, a spelling, a type spelling, an
//! originating file, and (for enumerators) a resolved integral value.
//! Keeping the contract this small lets the backend be swapped without
//! touching the entity model or the synthesizer.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while parsing a header.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The header file could not be read.
    #[error("failed to read header: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header text was rejected by the backend.
    #[error("failed to parse {path}: {detail}")]
    Syntax { path: PathBuf, detail: String },
}

/// How a header unit is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Treat the input as a standalone C header (no `main` required).
    #[default]
    CHeader,
}

/// Node kinds the pipeline discriminates on.
///
/// Anything a backend produces that the pipeline has no interest in is
/// tagged `Other` and skipped by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    FunctionDecl,
    ParmDecl,
    FieldDecl,
    EnumConstantDecl,
    TypedefDecl,
    StructDecl,
    UnionDecl,
    EnumDecl,
    TypeRef,
    #[default]
    Other,
}

/// A single declaration node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    /// Discriminating kind
    pub kind: NodeKind,

    /// Declared name
    pub spelling: String,

    /// Raw C type spelling. For function declarations this is the result
    /// type; for typedefs it is the canonical underlying type.
    pub type_spelling: String,

    /// File the declaration originates from, if known
    pub file: Option<PathBuf>,

    /// Resolved integral value, meaningful for enumerators only
    pub enum_value: i64,

    /// Child declarations in source order
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with the given kind and spelling.
    pub fn new(kind: NodeKind, spelling: impl Into<String>) -> Self {
        Node {
            kind,
            spelling: spelling.into(),
            ..Default::default()
        }
    }

    /// Set the type spelling.
    pub fn with_type(mut self, type_spelling: impl Into<String>) -> Self {
        self.type_spelling = type_spelling.into();
        self
    }

    /// Set the originating file.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the resolved enumerator value.
    pub fn with_value(mut self, value: i64) -> Self {
        self.enum_value = value;
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Iterate this node and all descendants in pre-order.
    pub fn walk_preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }
}

/// Pre-order iterator over a declaration subtree.
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// The parsed view of one header file.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationTree {
    path: PathBuf,
    root: Node,
}

impl DeclarationTree {
    /// Build a tree for a header from its top-level declarations.
    ///
    /// The root node's spelling is the header's file name; the root itself
    /// carries no originating file, so extraction filters never match it.
    pub fn new(path: impl Into<PathBuf>, declarations: Vec<Node>) -> Self {
        let path = path.into();
        let root = Node {
            kind: NodeKind::Other,
            spelling: path.display().to_string(),
            children: declarations,
            ..Default::default()
        };
        DeclarationTree { path, root }
    }

    /// The header this tree was parsed from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The root declaration node.
    pub fn root(&self) -> &Node {
        &self.root
    }
}

/// Parser backends turn a header file into a declaration tree.
pub trait AstBackend {
    /// Parse a header file in the given mode.
    fn parse(&self, header: &Path, mode: ParseMode) -> Result<DeclarationTree, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preorder_walk() {
        let tree = DeclarationTree::new(
            "test.h",
            vec![
                Node::new(NodeKind::TypedefDecl, "a")
                    .with_child(Node::new(NodeKind::StructDecl, "b")
                        .with_child(Node::new(NodeKind::FieldDecl, "c"))),
                Node::new(NodeKind::FunctionDecl, "d"),
            ],
        );

        let names: Vec<&str> = tree
            .root()
            .walk_preorder()
            .map(|n| n.spelling.as_str())
            .collect();
        assert_eq!(names, vec!["test.h", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_root_spelling_is_file_name() {
        let tree = DeclarationTree::new("xcb.h", Vec::new());
        assert_eq!(tree.root().spelling, "xcb.h");
        assert!(tree.root().file.is_none());
    }
}
