use anyhow::{Context, Result};
use docex_core::{SortKey, SortOrder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Document listing used when neither --documents nor DOCUMENTS_FILE is set
    #[serde(default)]
    pub documents_file: Option<PathBuf>,

    /// Export directory used when neither --out-dir nor EXPORT_DIR is set
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Listing sort key when --sort is omitted
    #[serde(default)]
    pub default_sort: SortKey,

    /// Listing sort order when --order is omitted
    #[serde(default)]
    pub default_order: SortOrder,

    /// Colour type badges and headings
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            documents_file: None,
            export_dir: None,
            default_sort: SortKey::default(),
            default_order: SortOrder::default(),
            color: default_color(),
        }
    }
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/docex/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("docex");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => match Self::default_config_path() {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "No config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.default_sort, SortKey::Date);
        assert_eq!(config.default_order, SortOrder::Desc);
        assert!(config.color);
        assert!(config.documents_file.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
default_sort = "title"
color = false
"#,
        )
        .unwrap();
        assert_eq!(config.default_sort, SortKey::Title);
        assert_eq!(config.default_order, SortOrder::Desc);
        assert!(!config.color);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(config.default_sort, SortKey::Date);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "documents_file = \"docs.json\"\ndefault_order = \"asc\"\n").unwrap();
        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(config.documents_file, Some(PathBuf::from("docs.json")));
        assert_eq!(config.default_order, SortOrder::Asc);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CliConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_sort, config.default_sort);
        assert_eq!(parsed.color, config.color);
    }
}
