//! C header parsing.
//!
//! The declaration tree is produced behind the narrow [`AstBackend`]
//! interface so the parser backend can be swapped without touching the
//! entity model or the synthesizer.

pub mod ast;
pub mod backend;

pub use ast::{AstBackend, DeclarationTree, Node, NodeKind, ParseError, ParseMode};
pub use backend::HeaderParser;
