//! Bundle version handling.
//!
//! Versions here are plain dot-separated counters (`1.2.7`), not semver: the
//! engine only ever increments the last segment.

use crate::error::{Result, VersionError};
use crate::settings::PlayerSettings;
use std::fmt;
use std::str::FromStr;

/// Version applied to WebGL builds when `BUILD_VERSION` is unset or empty
pub const DEFAULT_BUNDLE_VERSION: &str = "0.0.1";

/// A dot-separated version string with at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionString(String);

impl VersionString {
    /// Borrow the raw string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segments between the dots
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Increment the last segment.
    ///
    /// Earlier segments are carried over untouched, so `1.2.9` becomes
    /// `1.2.10` and never `1.3.0`.
    pub fn bump(&self) -> std::result::Result<VersionString, VersionError> {
        let (head, last) = match self.0.rsplit_once('.') {
            Some((head, last)) => (Some(head), last),
            None => (None, self.0.as_str()),
        };

        let next = last
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| VersionError::MalformedVersion {
                version: self.0.clone(),
                segment: last.to_string(),
            })?;

        Ok(VersionString(match head {
            Some(head) => format!("{head}.{next}"),
            None => next.to_string(),
        }))
    }
}

impl FromStr for VersionString {
    type Err = VersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(VersionError::Empty);
        }
        Ok(VersionString(s.to_string()))
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Increment the last segment of `current`.
///
/// Fails with [`VersionError::MalformedVersion`] when that segment is not a
/// non-negative integer.
pub fn bump_version(current: &str) -> Result<String> {
    let version: VersionString = current.parse()?;
    Ok(version.bump()?.to_string())
}

/// Bundle version for a WebGL build: the override verbatim, or
/// [`DEFAULT_BUNDLE_VERSION`] when it is absent or blank.
pub fn resolve_bundle_version(version_override: Option<&str>) -> String {
    match version_override {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => DEFAULT_BUNDLE_VERSION.to_string(),
    }
}

/// Version numbers after [`increase_version_numbers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionNumbers {
    /// New bundle version
    pub bundle_version: String,
    /// New Android version code
    pub android_version_code: u32,
    /// New iOS build number
    pub ios_build_number: String,
}

/// Bump the bundle version, the Android version code and the iOS build number.
///
/// All three are computed before any is written, so a malformed version
/// leaves `settings` untouched.
pub fn increase_version_numbers(settings: &mut PlayerSettings) -> Result<VersionNumbers> {
    let bundle_version = bump_version(&settings.bundle_version)?;
    let ios_build_number = bump_version(&settings.ios.build_number)?;
    let android_version_code = settings
        .android
        .bundle_version_code
        .checked_add(1)
        .ok_or_else(|| VersionError::MalformedVersion {
            version: settings.android.bundle_version_code.to_string(),
            segment: settings.android.bundle_version_code.to_string(),
        })?;

    settings.bundle_version = bundle_version.clone();
    settings.ios.build_number = ios_build_number.clone();
    settings.android.bundle_version_code = android_version_code;

    log::info!(
        "Version numbers increased: bundle {bundle_version}, android code {android_version_code}, ios build {ios_build_number}"
    );

    Ok(VersionNumbers {
        bundle_version,
        android_version_code,
        ios_build_number,
    })
}
