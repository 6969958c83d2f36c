//! Wrangler generation operation.
//!
//! Drives the full pipeline: parse each header, extract its declarations,
//! aggregate fragments into the wrangler context, then expand both
//! templates once against the fully-populated context.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::extract::{self, HeaderDeclarations};
use crate::parse::ast::{AstBackend, ParseMode};
use crate::template;
use crate::util::fs;
use crate::wrangler::Wrangler;

/// Summary of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Headers processed
    pub headers: usize,

    /// Functions extracted across all headers
    pub functions: usize,

    /// Typedefs extracted across all headers
    pub types: usize,

    /// Macro constant lines passed through
    pub defines: usize,
}

/// Run the generator over the configured headers and write both outputs.
pub fn generate(config: &GeneratorConfig, backend: &dyn AstBackend) -> Result<GenerateReport> {
    let mut wrangler = Wrangler::new();
    let mut report = GenerateReport::default();

    for header in &config.headers {
        let declarations = extract_header(header, backend, &config.define_prefix)?;
        tracing::info!(
            "{}: {} functions, {} types, {} defines",
            header.display(),
            declarations.functions.len(),
            declarations.types.len(),
            declarations.defines.len()
        );

        report.headers += 1;
        report.functions += declarations.functions.len();
        report.types += declarations.types.len();
        report.defines += declarations.defines.len();

        wrangler.add_header(header, &declarations);
    }

    // Both expansions observe the same fully-populated context.
    template::expand_to_file(&wrangler, &config.header_template, &config.header_out)?;
    template::expand_to_file(&wrangler, &config.source_template, &config.source_out)?;

    Ok(report)
}

/// One header's extracted model, for JSON output.
#[derive(Debug, Serialize)]
struct HeaderModel {
    header: PathBuf,
    #[serde(flatten)]
    declarations: HeaderDeclarations,
}

/// Extract the declaration model for every configured header as JSON.
pub fn dump_model(config: &GeneratorConfig, backend: &dyn AstBackend) -> Result<String> {
    let mut models = Vec::new();

    for header in &config.headers {
        let declarations = extract_header(header, backend, &config.define_prefix)?;
        models.push(HeaderModel {
            header: header.clone(),
            declarations,
        });
    }

    serde_json::to_string_pretty(&models).context("failed to serialize declaration model")
}

fn extract_header(
    header: &Path,
    backend: &dyn AstBackend,
    define_prefix: &str,
) -> Result<HeaderDeclarations> {
    let tree = backend
        .parse(header, ParseMode::CHeader)
        .with_context(|| format!("failed to parse header: {}", header.display()))?;
    let content = fs::read_to_string(header)?;
    Ok(extract::extract(&tree, &content, define_prefix))
}
