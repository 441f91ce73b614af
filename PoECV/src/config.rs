//! Viewer configuration (`config.toml`)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dialog::AliasTable;
use crate::error::Result;

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

/// Settings shared by the library facade and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Folder scanned for `.conversation` files
    #[serde(default)]
    pub corpus_root: Option<PathBuf>,
    /// Fixed string table folder; derived per file when unset
    #[serde(default)]
    pub localized_root: Option<PathBuf>,
    #[serde(default = "default_language")]
    pub language: String,
    /// Load the built-in companion GUIDs
    #[serde(default = "default_true")]
    pub companion_aliases: bool,
    /// Extra alias -> id pairs
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            corpus_root: None,
            localized_root: None,
            language: default_language(),
            companion_aliases: true,
            aliases: BTreeMap::new(),
        }
    }
}

impl ViewerConfig {
    /// Get the config file path
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("poecv").join("config.toml"))
    }

    /// Parse a config file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, otherwise return the defaults
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.corpus_root = config.corpus_root.map(|p| expand_tilde(&p));
        config.localized_root = config.localized_root.map(|p| expand_tilde(&p));
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config, creating parent folders
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Alias table for this configuration
    #[must_use]
    pub fn alias_table(&self) -> AliasTable {
        let mut table = if self.companion_aliases {
            AliasTable::companions()
        } else {
            AliasTable::new()
        };
        for (alias, id) in &self.aliases {
            table.insert(alias.as_str(), id.as_str());
        }
        table
    }
}

/// Expand a leading `~` to the user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = ViewerConfig::from_toml("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.language, "en");
        assert!(config.companion_aliases);
    }

    #[test]
    fn test_roundtrip() {
        let mut config = ViewerConfig {
            corpus_root: Some(PathBuf::from("/games/poe/data/conversations")),
            language: "de".to_string(),
            ..Default::default()
        };
        config
            .aliases
            .insert("Maerwald".to_string(), "0f00d000-0000-0000-0000-000000000000".to_string());

        let toml_str = config.to_toml().unwrap();
        let parsed = ViewerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_alias_table_merges_extra_pairs() {
        let config = ViewerConfig::from_toml(
            r#"
            companion_aliases = false

            [aliases]
            Maerwald = "0f00d000-0000-0000-0000-000000000000"
            "#,
        )
        .unwrap();
        let table = config.alias_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.canonical("0F00D000-0000-0000-0000-000000000000"), "Maerwald");

        let table = ViewerConfig::default().alias_table();
        assert_eq!(table.canonical("b1a7e805-0000-0000-0000-000000000000"), "Sagani");
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("poecv").join("config.toml");
        assert_eq!(ViewerConfig::load_or_default(&path).unwrap(), ViewerConfig::default());

        let config = ViewerConfig {
            language: "fr".to_string(),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(ViewerConfig::load_or_default(&path).unwrap().language, "fr");

        fs::write(&path, "language = [").unwrap();
        assert!(ViewerConfig::load(&path).is_err());
    }
}
