//! Defaults store backed by `.setuprc.json`
//!
//! The file seeds the interactive prompts. A missing or unreadable file is
//! not an error for loading: built-in defaults are used instead.

use crate::choice::{Editor, FeatureId, FrameworkVariant, LanguageVariant};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULTS_FILE: &str = ".setuprc.json";

#[derive(Debug, Error)]
pub enum DefaultsError {
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize defaults: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Values pre-selected in the prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Defaults {
    pub default_framework: FrameworkVariant,
    pub default_language: LanguageVariant,
    pub default_packages: Vec<FeatureId>,
    pub default_git_init: bool,
    pub default_install_deps: bool,
    #[serde(rename = "defaultIDE")]
    pub default_ide: Editor,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            default_framework: FrameworkVariant::Expo,
            default_language: LanguageVariant::TypeScript,
            default_packages: Vec::new(),
            default_git_init: true,
            default_install_deps: true,
            default_ide: Editor::None,
        }
    }
}

/// Reads and writes the defaults file in a directory
#[derive(Debug, Clone)]
pub struct DefaultsStore {
    path: PathBuf,
}

impl DefaultsStore {
    /// Store for `dir/.setuprc.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(DEFAULTS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the defaults, falling back to built-ins
    pub fn load(&self) -> Defaults {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Defaults::default(),
        };

        match serde_json::from_str(&content) {
            Ok(defaults) => {
                tracing::debug!(path = %self.path.display(), "loaded defaults");
                defaults
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring invalid defaults file");
                Defaults::default()
            }
        }
    }

    pub fn save(&self, defaults: &Defaults) -> Result<(), DefaultsError> {
        let content = serde_json::to_string_pretty(defaults)?;
        std::fs::write(&self.path, content).map_err(|source| DefaultsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_builtin_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let defaults = DefaultsStore::in_dir(dir.path()).load();
        assert_eq!(defaults, Defaults::default());
        assert!(defaults.default_git_init);
        assert_eq!(defaults.default_ide, Editor::None);
    }

    #[test]
    fn test_partial_file_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULTS_FILE),
            r#"{ "defaultFramework": "rn-cli", "defaultPackages": ["axios", "zustand"], "defaultIDE": "None" }"#,
        )
        .unwrap();

        let defaults = DefaultsStore::in_dir(dir.path()).load();
        assert_eq!(defaults.default_framework, FrameworkVariant::ReactNativeCli);
        assert_eq!(
            defaults.default_packages,
            vec![FeatureId::Axios, FeatureId::Zustand]
        );
        assert_eq!(defaults.default_language, LanguageVariant::TypeScript);
        assert!(defaults.default_install_deps);
    }

    #[test]
    fn test_invalid_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULTS_FILE), "{ not json").unwrap();
        assert_eq!(DefaultsStore::in_dir(dir.path()).load(), Defaults::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DefaultsStore::in_dir(dir.path());
        let defaults = Defaults {
            default_framework: FrameworkVariant::ReactNativeCli,
            default_language: LanguageVariant::JavaScript,
            default_packages: vec![FeatureId::Lottie],
            default_git_init: false,
            default_install_deps: false,
            default_ide: Editor::Cursor,
        };

        store.save(&defaults).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"defaultIDE\": \"cursor\""));
        assert_eq!(store.load(), defaults);
    }
}
