//! The `docsmith.toml` configuration model.
//!
//! Layered loading: file values first, then `DOCSMITH_*` environment
//! overrides. Formatting heuristics live in [`FormatPolicy`] so a project can
//! tune them without forking the formatter.

use std::path::{Path, PathBuf};

use docsmith_format::FormatPolicy;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "docsmith.toml";

/// Top-level docsmith configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocsConfig {
    /// Documentation pages to build.
    pub pages: Vec<PageConfig>,
    /// Formatting heuristics, merged over the built-in defaults.
    pub policy: FormatPolicy,
    /// Demo bundling, when the project ships code demos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demos: Option<DemosConfig>,
}

/// One documentation page: a title, per-variant extractor output, and the
/// markdown file the build maintains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    pub title: String,
    /// Variant name -> extractor JSON file for that variant.
    pub variants: IndexMap<String, PathBuf>,
    /// Markdown file to write (and re-parse on later runs).
    pub out: PathBuf,
    /// JSON sidecar with the structured data, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_out: Option<PathBuf>,
}

/// Demo bundling configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemosConfig {
    /// Directories containing demo variant subdirectories.
    pub roots: Vec<PathBuf>,
    /// Manifest file the `demos` command writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_out: Option<PathBuf>,
}

impl DocsConfig {
    /// Load configuration from an explicit file plus environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let config: DocsConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("DOCSMITH_").split("__"))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Walk from `start` upward looking for a `docsmith.toml`.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let mut current = Some(start);
        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            current = dir.parent();
        }
        None
    }

    /// Semantic checks that deserialization cannot express.
    pub fn validate(&self) -> Result<()> {
        for (index, page) in self.pages.iter().enumerate() {
            if page.title.trim().is_empty() {
                return Err(ConfigError::validation(format!(
                    "pages[{index}] has an empty title"
                )));
            }
            if page.variants.is_empty() {
                return Err(ConfigError::validation(format!(
                    "page '{}' declares no variants",
                    page.title
                )));
            }
            if page.out.as_os_str().is_empty() {
                return Err(ConfigError::validation(format!(
                    "page '{}' has no output path",
                    page.title
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_minimal_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
[[pages]]
title = "Accordion"
out = "docs/accordion.md"

[pages.variants]
CssModules = "extract/accordion-css-modules.json"
Tailwind = "extract/accordion-tailwind.json"

[policy]
printWidth = 100
"#,
        )
        .unwrap();

        let config = DocsConfig::load(&path).unwrap();
        assert_eq!(config.pages.len(), 1);
        let page = &config.pages[0];
        assert_eq!(page.title, "Accordion");
        assert_eq!(page.variants.len(), 2);
        assert_eq!(config.policy.print_width, 100);
        // Unset policy fields keep their defaults.
        assert_eq!(config.policy.hook_prefix, "use");
    }

    #[test]
    fn missing_file_is_reported() {
        let result = DocsConfig::load(Path::new("/nonexistent/docsmith.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn empty_variants_fail_validation() {
        let config = DocsConfig {
            pages: vec![PageConfig {
                title: "Accordion".to_string(),
                out: PathBuf::from("docs/accordion.md"),
                ..PageConfig::default()
            }],
            ..DocsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn discovery_walks_upward() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("packages/react/src");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "pages = []\n").unwrap();

        let found = DocsConfig::discover(&nested).expect("config found");
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(DocsConfig::discover(Path::new("/nonexistent-root")), None);
    }
}
