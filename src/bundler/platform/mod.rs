//! Build targets and their platform-specific preparation.
//!
//! # Supported Targets
//!
//! | Target | Engine platform | Artifact | Module |
//! |--------|-----------------|----------|--------|
//! | `webgl` | `WebGL` | directory | [`webgl`] |
//! | `android-apk` | `Android` | `.apk` file | [`android`] |
//! | `android-aab` | `Android` | `.aab` bundle | [`android`] |
//!
//! Each flow mutates the [`PlayerSettings`](crate::settings::PlayerSettings)
//! it is handed and returns the effective [`BuildOptions`](super::BuildOptions)
//! the backend should build with.

pub mod android;
pub mod webgl;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platform family a target belongs to.
///
/// Mirrors the engine's notion of a target group; both Android targets share
/// the same group and output directory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetGroup {
    /// Browser build
    WebGl,
    /// Android phone/tablet build
    Android,
}

/// A release target selectable by the operator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum BuildTarget {
    /// WebGL player, written as a directory.
    WebGl,

    /// Unsigned development APK.
    AndroidApk,

    /// Android App Bundle for store distribution.
    AndroidAab,
}

impl BuildTarget {
    /// Returns the identifier used on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            BuildTarget::WebGl => "webgl",
            BuildTarget::AndroidApk => "android-apk",
            BuildTarget::AndroidAab => "android-aab",
        }
    }

    /// Returns the engine platform name, used as the output directory.
    pub fn platform_dir(&self) -> &'static str {
        match self.group() {
            TargetGroup::WebGl => "WebGL",
            TargetGroup::Android => "Android",
        }
    }

    /// Returns the platform family of this target.
    pub fn group(&self) -> TargetGroup {
        match self {
            BuildTarget::WebGl => TargetGroup::WebGl,
            BuildTarget::AndroidApk | BuildTarget::AndroidAab => TargetGroup::Android,
        }
    }

    /// Suffix appended to the output path, if the artifact is a single file
    /// whose name the engine does not choose itself.
    pub fn output_suffix(&self) -> Option<&'static str> {
        match self {
            BuildTarget::AndroidApk => Some(".apk"),
            BuildTarget::WebGl | BuildTarget::AndroidAab => None,
        }
    }

    /// All targets, in the order they appear in the CLI help.
    pub fn all() -> [BuildTarget; 3] {
        [
            BuildTarget::AndroidAab,
            BuildTarget::AndroidApk,
            BuildTarget::WebGl,
        ]
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for BuildTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildTarget::all()
            .into_iter()
            .find(|t| t.short_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown target '{s}', expected one of: {}",
                    BuildTarget::all().map(|t| t.short_name()).join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn android_targets_share_platform_dir() {
        assert_eq!(BuildTarget::AndroidApk.platform_dir(), "Android");
        assert_eq!(BuildTarget::AndroidAab.platform_dir(), "Android");
        assert_eq!(BuildTarget::WebGl.platform_dir(), "WebGL");
    }

    #[test]
    fn parses_cli_names() {
        for target in BuildTarget::all() {
            assert_eq!(target.short_name().parse::<BuildTarget>().unwrap(), target);
        }
        assert_eq!("WebGL".parse::<BuildTarget>().unwrap(), BuildTarget::WebGl);
        assert!("ios".parse::<BuildTarget>().is_err());
    }

    #[test]
    fn only_apk_has_suffix() {
        assert_eq!(BuildTarget::AndroidApk.output_suffix(), Some(".apk"));
        assert_eq!(BuildTarget::AndroidAab.output_suffix(), None);
        assert_eq!(BuildTarget::WebGl.output_suffix(), None);
    }
}
