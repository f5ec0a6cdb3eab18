//! Settings file persistence.
//!
//! Reads with `toml`/serde and writes back through `toml_edit`, so comments
//! and key order the operator put in the file survive a build.

use crate::error::{Result, SettingsError};
use crate::settings::PlayerSettings;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item, Table};

/// Loads and saves [`PlayerSettings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store for the given settings file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load(&self) -> Result<PlayerSettings> {
        if !self.path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                self.path.display()
            );
            return Ok(PlayerSettings::default());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| SettingsError::LoadFailed {
                path: self.path.clone(),
                reason: format!("Failed to read file: {e}"),
            })?;

        let settings = toml::from_str(&content).map_err(|e| SettingsError::LoadFailed {
            path: self.path.clone(),
            reason: format!("Failed to parse TOML: {e}"),
        })?;

        log::debug!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    /// Write settings back, preserving the layout of an existing file.
    pub fn save(&self, settings: &PlayerSettings) -> Result<()> {
        let serialized = toml::to_string(settings).map_err(|e| self.save_error(e))?;
        let fresh = serialized
            .parse::<DocumentMut>()
            .map_err(|e| self.save_error(e))?;

        let doc = if self.path.exists() {
            let existing =
                std::fs::read_to_string(&self.path).map_err(|e| self.save_error(e))?;
            let mut doc = existing
                .parse::<DocumentMut>()
                .map_err(|e| self.save_error(format!("Failed to parse existing TOML: {e}")))?;
            merge_tables(doc.as_table_mut(), fresh.as_table());
            doc
        } else {
            fresh
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.save_error(e))?;
        }

        // Write to a sibling temp file first so a crash never leaves half a file
        let temp_path = self.path.with_extension("toml.tmp");
        std::fs::write(&temp_path, doc.to_string()).map_err(|e| self.save_error(e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.save_error(e))?;

        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }

    fn save_error(&self, reason: impl std::fmt::Display) -> SettingsError {
        SettingsError::SaveFailed {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Apply `fresh` onto `existing`: values are replaced in place keeping their
/// surrounding comments, tables are merged recursively, and keys that no
/// longer exist are removed.
fn merge_tables(existing: &mut Table, fresh: &Table) {
    let stale: Vec<String> = existing
        .iter()
        .map(|(key, _)| key.to_string())
        .filter(|key| !fresh.contains_key(key))
        .collect();
    for key in stale {
        existing.remove(&key);
    }

    for (key, fresh_item) in fresh.iter() {
        match (existing.get_mut(key), fresh_item) {
            (Some(Item::Table(current)), Item::Table(incoming)) => {
                merge_tables(current, incoming);
            }
            (Some(Item::Value(current)), Item::Value(incoming)) => {
                let decor = current.decor().clone();
                *current = incoming.clone();
                *current.decor_mut() = decor;
            }
            _ => {
                existing.insert(key, fresh_item.clone());
            }
        }
    }
}
