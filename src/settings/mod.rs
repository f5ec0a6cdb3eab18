//! Project settings: the explicit replacement for the engine's global
//! player-settings object.
//!
//! Settings are loaded once per invocation, handed by `&mut` to the build
//! flows, and written back when a command finishes successfully.

mod player;
mod store;

pub use player::{
    AndroidSettings, AssetBundleSettings, IosSettings, PlayerSettings, WebGlCompression,
    WebGlSettings, APK_TARGET_SDK, DEFAULT_PRODUCT_NAME, DEFAULT_SCENE, PACKAGE_IDENTIFIER,
};
pub use store::SettingsStore;

use std::path::{Path, PathBuf};

/// Settings file location relative to the project root.
pub const SETTINGS_FILE: &str = "ProjectSettings/player.toml";

/// Default settings path for a project root.
pub fn default_settings_path(project_root: &Path) -> PathBuf {
    project_root.join(SETTINGS_FILE)
}
