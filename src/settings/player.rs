//! Player settings model.

use crate::bundler::SigningConfig;
use crate::error::{Result, SettingsError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Product name used when the settings file does not name one
pub const DEFAULT_PRODUCT_NAME: &str = "AR-Magic-Lite";

/// The single scene every player build starts from
pub const DEFAULT_SCENE: &str = "Assets/Scenes/SampleScene.unity";

/// Android application identifier applied by the Android flows
pub const PACKAGE_IDENTIFIER: &str = "com.tcgames.armagiclite";

/// Target SDK API level pinned for development APKs
pub const APK_TARGET_SDK: u32 = 33;

/// WebGL compression format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebGlCompression {
    /// No compression; largest download, no decompression on load
    Disabled,
    /// Gzip
    #[default]
    Gzip,
    /// Brotli
    Brotli,
}

/// Android section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidSettings {
    /// Application identifier (package name)
    pub application_identifier: String,
    /// Monotonic store version code
    pub bundle_version_code: u32,
    /// Target SDK API level, `None` for the highest installed
    pub target_sdk_version: Option<u32>,
    /// Sign with [`signing`](Self::signing) instead of the debug key
    pub use_custom_keystore: bool,
    /// Produce an App Bundle instead of an APK
    pub build_app_bundle: bool,
    /// Keystore configuration
    pub signing: Option<SigningConfig>,
}

impl Default for AndroidSettings {
    fn default() -> Self {
        Self {
            application_identifier: PACKAGE_IDENTIFIER.to_string(),
            bundle_version_code: 1,
            target_sdk_version: None,
            use_custom_keystore: false,
            build_app_bundle: false,
            signing: None,
        }
    }
}

impl AndroidSettings {
    /// Signing configuration that applies to the next build.
    ///
    /// Fails when a custom keystore is requested but none is configured.
    pub fn effective_signing(&self) -> Result<Option<SigningConfig>> {
        if !self.use_custom_keystore {
            return Ok(None);
        }
        match &self.signing {
            Some(signing) => Ok(Some(signing.clone())),
            None => Err(SettingsError::Invalid {
                reason: "android.use_custom_keystore is set but [android.signing] is missing"
                    .to_string(),
            }
            .into()),
        }
    }
}

/// iOS section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IosSettings {
    /// Build number, dot-separated like the bundle version
    pub build_number: String,
}

impl Default for IosSettings {
    fn default() -> Self {
        Self {
            build_number: "0".to_string(),
        }
    }
}

/// WebGL section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebGlSettings {
    /// Compression of the player data files
    pub compression_format: WebGlCompression,
}

/// Asset bundling section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetBundleSettings {
    /// Regenerate the remote catalog on build
    pub build_remote_catalog: bool,
    /// Where the remote catalog is written, relative to the project root
    pub remote_catalog_build_path: Option<PathBuf>,
}

impl AssetBundleSettings {
    /// Folder to clear before a build, if the catalog is regenerated.
    pub fn remote_catalog_path(&self) -> Option<&PathBuf> {
        if !self.build_remote_catalog {
            return None;
        }
        self.remote_catalog_build_path
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Player settings for one project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Product name, last component of every output path
    pub product_name: String,
    /// Marketing version shown to users
    pub bundle_version: String,
    /// Scenes included in the player, first one is loaded on start
    pub scenes: Vec<String>,
    /// Show the engine splash screen
    pub splash_screen_show: bool,
    /// Android section
    pub android: AndroidSettings,
    /// iOS section
    pub ios: IosSettings,
    /// WebGL section
    pub webgl: WebGlSettings,
    /// Asset bundling section
    pub asset_bundles: AssetBundleSettings,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            bundle_version: crate::version::DEFAULT_BUNDLE_VERSION.to_string(),
            scenes: vec![DEFAULT_SCENE.to_string()],
            splash_screen_show: true,
            android: AndroidSettings::default(),
            ios: IosSettings::default(),
            webgl: WebGlSettings::default(),
            asset_bundles: AssetBundleSettings::default(),
        }
    }
}
