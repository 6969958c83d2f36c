//! Code fragment synthesis for the wrangler shim.
//!
//! Each function contributes six fragments: a function-pointer typedef,
//! an extern declaration and a storage definition for the resolved
//! pointer, a loader line, a forwarding wrapper body, and a wrapper
//! prototype. Typedefs and macro constants contribute one fragment each.

use std::path::Path;

use crate::model::{Function, TypeDefinition};

/// Comment marker identifying a header's contribution inside a bucket.
pub fn header_marker(header: &Path) -> String {
    format!("/* {} */", file_name(header))
}

/// Macro prefix for a header's dynload lines: file stem, upper-cased.
pub fn library_macro_prefix(header: &Path) -> String {
    header
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

fn file_name(header: &Path) -> String {
    header
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| header.display().to_string())
}

/// `typedef <ret> (*t<name>) (<args>);` function-pointer typedefs.
pub fn function_typedefs(functions: &[Function]) -> Vec<String> {
    functions
        .iter()
        .map(|function| {
            format!(
                "typedef {} (*t{}) ({});",
                function.return_type,
                function.name,
                function.parameter_list(",")
            )
        })
        .collect()
}

/// `extern t<name> <name>_impl;` declarations for the resolved pointers.
pub fn extern_declarations(functions: &[Function]) -> Vec<String> {
    functions
        .iter()
        .map(|function| format!("extern t{} {}_impl;", function.name, function.name))
        .collect()
}

/// `t<name> <name>_impl;` storage definitions.
pub fn extern_definitions(functions: &[Function]) -> Vec<String> {
    functions
        .iter()
        .map(|function| format!("t{} {}_impl;", function.name, function.name))
        .collect()
}

/// Loader-routine lines resolving each symbol, nested by two spaces.
pub fn dynload_calls(header: &Path, functions: &[Function]) -> Vec<String> {
    let prefix = library_macro_prefix(header);
    functions
        .iter()
        .map(|function| format!("  {}_LIBRARY_FIND({});", prefix, function.name))
        .collect()
}

/// Wrapper definitions forwarding to the resolved pointer under the
/// original API name.
pub fn wrapper_bodies(functions: &[Function]) -> Vec<String> {
    functions
        .iter()
        .map(|function| {
            format!(
                "{} {}({}) {{\n  return {}_impl({});\n}}\n",
                function.return_type,
                function.name,
                function.parameter_list(", "),
                function.name,
                function.argument_names()
            )
        })
        .collect()
}

/// Wrapper prototypes matching the original API functions exactly.
pub fn wrapper_prototypes(functions: &[Function]) -> Vec<String> {
    functions
        .iter()
        .map(|function| {
            format!(
                "{} {}({});",
                function.return_type,
                function.name,
                function.parameter_list(", ")
            )
        })
        .collect()
}

/// `typedef <rendered> <name>;` fragments.
pub fn type_definitions(types: &[TypeDefinition]) -> Vec<String> {
    types
        .iter()
        .map(|typedef| format!("{};\n", typedef.declaration()))
        .collect()
}
