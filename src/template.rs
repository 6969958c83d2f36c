//! Template substitution engine.
//!
//! Replaces `%<bucket>%` placeholder tokens in template text with the
//! newline-joined content of the matching wrangler bucket. A placeholder
//! without a bucket stays in the output, and a bucket without a
//! placeholder is dropped; both are accepted silently as far as the run
//! outcome goes, but reported as lint warnings.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use regex::Regex;

use crate::util::fs;
use crate::wrangler::Wrangler;

/// Substitute every known placeholder token in the template text.
pub fn substitute(wrangler: &Wrangler, template: &str) -> String {
    let mut data = template.to_string();
    for (name, lines) in wrangler.buckets() {
        let token = format!("%{}%", name);
        data = data.replace(&token, &lines.join("\n"));
    }
    data
}

/// Warn about mismatches between a template and the wrangler context.
pub fn lint(wrangler: &Wrangler, template: &str, origin: &Path) {
    let known: HashSet<String> = wrangler
        .buckets()
        .iter()
        .map(|(name, _)| format!("%{}%", name))
        .collect();

    let re = Regex::new(r"%[a-z_]+%").unwrap();
    for token in re.find_iter(template) {
        if !known.contains(token.as_str()) {
            tracing::warn!(
                "{}: unknown placeholder {} left untouched",
                origin.display(),
                token.as_str()
            );
        }
    }

    for (name, lines) in wrangler.buckets() {
        if !lines.is_empty() && !template.contains(&format!("%{}%", name)) {
            tracing::warn!(
                "{}: bucket {} has content but no placeholder, content dropped",
                origin.display(),
                name
            );
        }
    }
}

/// Expand one template file into its destination, overwriting.
pub fn expand_to_file(wrangler: &Wrangler, template: &Path, destination: &Path) -> Result<()> {
    let data = fs::read_to_string(template)?;
    lint(wrangler, &data, template);
    fs::write_string(destination, &substitute(wrangler, &data))?;
    tracing::debug!("wrote {}", destination.display());
    Ok(())
}
