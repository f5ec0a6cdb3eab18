//! Build option bag and the backend flag bitmask derived from it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Compression codec the backend applies to player data.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Engine default
    #[default]
    Default,
    /// LZ4, fast to build
    Lz4,
    /// LZ4 high compression, slower to build, same unpack speed
    Lz4Hc,
}

/// Android packaging format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Packaging {
    /// Plain installable `.apk`
    #[default]
    Apk,
    /// Android App Bundle
    AppBundle,
}

/// Keystore signing configuration.
///
/// Every field is required, so a configuration is either complete or absent
/// (`Option<SigningConfig>`). A partially filled keystore section fails to
/// deserialize.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Path to the keystore file
    pub keystore_path: PathBuf,
    /// Keystore password
    pub keystore_pass: String,
    /// Key alias inside the keystore
    pub key_alias_name: String,
    /// Key alias password
    pub key_alias_pass: String,
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("keystore_path", &self.keystore_path)
            .field("keystore_pass", &"<redacted>")
            .field("key_alias_name", &self.key_alias_name)
            .field("key_alias_pass", &"<redacted>")
            .finish()
    }
}

/// Options describing one build.
///
/// The CLI fills in the operator-controlled fields (`copy_server_data`,
/// `version_override`); each platform flow then derives the effective options
/// it hands to the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Compression codec
    pub compression: Compression,
    /// Development build (debuggable, profiler enabled)
    pub development: bool,
    /// Android packaging; ignored by non-Android targets
    pub packaging: Packaging,
    /// Custom signing, `None` for the engine's debug key
    pub signing: Option<SigningConfig>,
    /// Stage `ServerData/<platform>` next to the WebGL player
    pub copy_server_data: bool,
    /// Bundle version to apply before a WebGL build
    pub version_override: Option<String>,
}

impl BuildOptions {
    /// Backend flag bitmask for these options.
    pub fn flags(&self) -> BuildFlags {
        let mut flags = BuildFlags::empty();
        if self.development {
            flags |= BuildFlags::DEVELOPMENT;
        }
        match self.compression {
            Compression::Default => {}
            Compression::Lz4 => flags |= BuildFlags::COMPRESS_LZ4,
            Compression::Lz4Hc => flags |= BuildFlags::COMPRESS_LZ4HC,
        }
        flags
    }
}

bitflags! {
    /// Bitmask of build options understood by the backend.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct BuildFlags: u32 {
        /// Development build
        const DEVELOPMENT = 1 << 0;
        /// Compress with LZ4
        const COMPRESS_LZ4 = 1 << 1;
        /// Compress with LZ4HC
        const COMPRESS_LZ4HC = 1 << 2;
        /// Regenerate and include the remote asset catalog
        const INCLUDE_CATALOG = 1 << 3;
    }
}

impl fmt::Display for BuildFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<String> = self
            .iter_names()
            .map(|(name, _)| name.to_lowercase().replace('_', "-"))
            .collect();
        write!(f, "{}", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_have_no_flags() {
        assert!(BuildOptions::default().flags().is_empty());
    }

    #[test]
    fn development_lz4hc_flags() {
        let options = BuildOptions {
            development: true,
            compression: Compression::Lz4Hc,
            ..Default::default()
        };
        let flags = options.flags();
        assert!(flags.contains(BuildFlags::DEVELOPMENT));
        assert!(flags.contains(BuildFlags::COMPRESS_LZ4HC));
        assert!(!flags.contains(BuildFlags::COMPRESS_LZ4));
        assert_eq!(flags.to_string(), "development | compress-lz4hc");
        assert_eq!(flags.bits(), 0b101);
    }

    #[test]
    fn catalog_flag_is_named_in_display() {
        let flags = BuildFlags::COMPRESS_LZ4 | BuildFlags::INCLUDE_CATALOG;
        assert_eq!(flags.to_string(), "compress-lz4 | include-catalog");
        assert_eq!(BuildFlags::empty().to_string(), "none");
    }

    #[test]
    fn signing_debug_hides_passwords() {
        let signing = SigningConfig {
            keystore_path: "release.keystore".into(),
            keystore_pass: "hunter2".into(),
            key_alias_name: "upload".into(),
            key_alias_pass: "hunter3".into(),
        };
        let rendered = format!("{signing:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("hunter3"));
        assert!(rendered.contains("upload"));
    }
}
