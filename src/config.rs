//! Generator configuration.
//!
//! The header list, define-prefix gate, template locations, and output
//! destinations are explicit configuration rather than entry-point state.
//! Values come from `ewgen.toml` when present, field defaults fill the
//! rest, and individual CLI flags override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file name looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "ewgen.toml";

/// Configuration for one generator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Headers processed when none are given on the command line
    pub headers: Vec<PathBuf>,

    /// Macro constant gate: `#define <prefix>...` lines pass through
    pub define_prefix: String,

    /// Template for the declarations artifact
    pub header_template: PathBuf,

    /// Template for the definitions artifact
    pub source_template: PathBuf,

    /// Destination of the declarations artifact
    pub header_out: PathBuf,

    /// Destination of the definitions artifact
    pub source_out: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            headers: vec![
                PathBuf::from("/usr/include/xcb/xcb.h"),
                PathBuf::from("/usr/include/xcb/xproto.h"),
            ],
            define_prefix: "XCB".to_string(),
            header_template: PathBuf::from("templates/xcbew.template.h"),
            source_template: PathBuf::from("templates/xcbew.template.c"),
            header_out: PathBuf::from("include/xcbew.h"),
            source_out: PathBuf::from("source/xcbew.c"),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.headers.len(), 2);
        assert_eq!(config.define_prefix, "XCB");
        assert_eq!(config.header_out, PathBuf::from("include/xcbew.h"));
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("ewgen.toml");

        std::fs::write(
            &config_path,
            r#"
headers = ["gl.h", "glext.h"]
define_prefix = "GL"
header_out = "include/glew.h"
"#,
        )
        .unwrap();

        let config = GeneratorConfig::load(&config_path).unwrap();
        assert_eq!(
            config.headers,
            vec![PathBuf::from("gl.h"), PathBuf::from("glext.h")]
        );
        assert_eq!(config.define_prefix, "GL");
        assert_eq!(config.header_out, PathBuf::from("include/glew.h"));
        // Unset fields keep their defaults.
        assert_eq!(config.source_out, PathBuf::from("source/xcbew.c"));
    }

    #[test]
    fn test_config_load_or_default_missing() {
        let tmp = TempDir::new().unwrap();
        let config = GeneratorConfig::load_or_default(&tmp.path().join("absent.toml"));
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_config_load_rejects_bad_toml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("ewgen.toml");
        std::fs::write(&config_path, "headers = not-a-list").unwrap();

        assert!(GeneratorConfig::load(&config_path).is_err());
    }
}
