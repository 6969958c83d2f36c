//! ewgen - a dynamic-loading wrangler generator for C libraries
//!
//! This crate provides the core library functionality for ewgen:
//! parsing C headers into a declaration tree, building the entity model,
//! synthesizing shim code fragments, and substituting them into the two
//! output templates.

pub mod config;
pub mod extract;
pub mod gen;
pub mod model;
pub mod ops;
pub mod parse;
pub mod template;
pub mod util;
pub mod wrangler;

pub use config::GeneratorConfig;
pub use extract::HeaderDeclarations;
pub use model::{Argument, Function, TypeDefinition};
pub use parse::{AstBackend, DeclarationTree, HeaderParser, ParseError, ParseMode};
pub use wrangler::Wrangler;
