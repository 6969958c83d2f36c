//! The wrangler aggregation context.
//!
//! A fixed record of named buckets, one per generated-fragment category,
//! so the fragment taxonomy is checked at compile time instead of living
//! in a free-form nested map. Buckets are append-only; lines accumulate
//! in header processing order and, within a header, in source declaration
//! order. Each header's contribution starts with a comment marker naming
//! the header, so readers can locate where a block of generated code came
//! from. No deduplication happens here: reprocessing a header duplicates
//! its fragments.

use std::path::Path;

use crate::extract::HeaderDeclarations;
use crate::gen::synth;
use crate::model::{Function, TypeDefinition};

/// Aggregated fragment buckets for one generator run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wrangler {
    /// Function-pointer typedefs
    pub function_typedefs: Vec<String>,

    /// Wrapper prototypes matching the original API
    pub wrapper_declarations: Vec<String>,

    /// Extern declarations of the resolved pointers
    pub function_declarations: Vec<String>,

    /// Storage definitions of the resolved pointers
    pub function_definitions: Vec<String>,

    /// Loader-routine lines
    pub dynload_calls: Vec<String>,

    /// Forwarding wrapper bodies
    pub function_wrappers: Vec<String>,

    /// Rendered typedef statements
    pub type_definitions: Vec<String>,

    /// Macro constant passthrough lines
    pub define_lines: Vec<String>,
}

impl Wrangler {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header's function fragments to the function buckets.
    pub fn add_functions(&mut self, header: &Path, functions: &[Function]) {
        let marker = synth::header_marker(header);

        self.function_typedefs.push(marker.clone());
        self.function_typedefs
            .extend(synth::function_typedefs(functions));

        self.wrapper_declarations.push(marker.clone());
        self.wrapper_declarations
            .extend(synth::wrapper_prototypes(functions));

        self.function_declarations.push(marker.clone());
        self.function_declarations
            .extend(synth::extern_declarations(functions));

        self.function_definitions.push(marker.clone());
        self.function_definitions
            .extend(synth::extern_definitions(functions));

        // The dynload marker nests inside the loader routine body.
        self.dynload_calls.push(format!("  {}", marker));
        self.dynload_calls
            .extend(synth::dynload_calls(header, functions));

        self.function_wrappers.push(marker);
        self.function_wrappers
            .extend(synth::wrapper_bodies(functions));
    }

    /// Append a header's typedef fragments.
    pub fn add_types(&mut self, header: &Path, types: &[TypeDefinition]) {
        self.type_definitions.push(synth::header_marker(header));
        self.type_definitions
            .extend(synth::type_definitions(types));
    }

    /// Append a header's macro constant lines verbatim.
    pub fn add_defines(&mut self, header: &Path, defines: &[String]) {
        self.define_lines.push(synth::header_marker(header));
        self.define_lines.extend(defines.iter().cloned());
    }

    /// Append everything extracted from one header.
    pub fn add_header(&mut self, header: &Path, declarations: &HeaderDeclarations) {
        self.add_functions(header, &declarations.functions);
        self.add_types(header, &declarations.types);
        self.add_defines(header, &declarations.defines);
    }

    /// Buckets paired with their placeholder names.
    pub fn buckets(&self) -> [(&'static str, &[String]); 8] {
        [
            ("functions_typedefs", self.function_typedefs.as_slice()),
            (
                "functions_wrapper_declarations",
                self.wrapper_declarations.as_slice(),
            ),
            (
                "functions_declarations",
                self.function_declarations.as_slice(),
            ),
            (
                "functions_definitions",
                self.function_definitions.as_slice(),
            ),
            ("functions_dynload", self.dynload_calls.as_slice()),
            ("functions_wrappers", self.function_wrappers.as_slice()),
            ("types_definitions", self.type_definitions.as_slice()),
            ("definitions_all", self.define_lines.as_slice()),
        ]
    }
}
