//! High-level operations.

pub mod generate;

pub use generate::{dump_model, generate, GenerateReport};
