//! Android flows: App Bundle for the store, development APK for devices.

use crate::bundler::options::{BuildOptions, Compression, Packaging};
use crate::error::Result;
use crate::settings::{APK_TARGET_SDK, PACKAGE_IDENTIFIER, PlayerSettings};

/// Apply App Bundle settings and return the effective options.
///
/// Signing follows the settings file: the custom keystore is used only when
/// `use_custom_keystore` is on.
pub fn prepare_app_bundle(settings: &mut PlayerSettings) -> Result<BuildOptions> {
    settings.android.application_identifier = PACKAGE_IDENTIFIER.to_string();
    settings.android.build_app_bundle = true;
    settings.splash_screen_show = false;

    Ok(BuildOptions {
        packaging: Packaging::AppBundle,
        signing: settings.android.effective_signing()?,
        ..BuildOptions::default()
    })
}

/// Apply development APK settings and return the effective options.
///
/// Custom signing is switched off, so the effective options never carry a
/// keystore. The keystore table itself stays in the settings file for the
/// next bundle build.
pub fn prepare_apk(settings: &mut PlayerSettings) -> Result<BuildOptions> {
    settings.android.application_identifier = PACKAGE_IDENTIFIER.to_string();
    settings.android.build_app_bundle = false;
    settings.android.use_custom_keystore = false;
    settings.android.target_sdk_version = Some(APK_TARGET_SDK);
    settings.splash_screen_show = false;

    Ok(BuildOptions {
        packaging: Packaging::Apk,
        development: true,
        compression: Compression::Lz4Hc,
        signing: settings.android.effective_signing()?,
        ..BuildOptions::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{BuildFlags, SigningConfig};

    fn signed_settings() -> PlayerSettings {
        let mut settings = PlayerSettings::default();
        settings.android.use_custom_keystore = true;
        settings.android.signing = Some(SigningConfig {
            keystore_path: "./release.keystore".into(),
            keystore_pass: "pass".into(),
            key_alias_name: "release".into(),
            key_alias_pass: "pass".into(),
        });
        settings
    }

    #[test]
    fn apk_drops_signing() {
        let mut settings = signed_settings();
        let options = prepare_apk(&mut settings).unwrap();
        assert!(options.signing.is_none());
        assert!(!settings.android.use_custom_keystore);
        assert!(settings.android.signing.is_some());
    }

    #[test]
    fn apk_pins_sdk_and_flags() {
        let mut settings = PlayerSettings::default();
        let options = prepare_apk(&mut settings).unwrap();
        assert_eq!(settings.android.target_sdk_version, Some(33));
        assert!(!settings.android.build_app_bundle);
        assert_eq!(
            options.flags(),
            BuildFlags::DEVELOPMENT | BuildFlags::COMPRESS_LZ4HC
        );
    }

    #[test]
    fn app_bundle_keeps_configured_signing() {
        let mut settings = signed_settings();
        settings.android.application_identifier = "com.example.other".into();
        let options = prepare_app_bundle(&mut settings).unwrap();
        assert_eq!(options.packaging, Packaging::AppBundle);
        assert!(options.signing.is_some());
        assert!(options.flags().is_empty());
        assert!(settings.android.build_app_bundle);
        assert_eq!(settings.android.application_identifier, PACKAGE_IDENTIFIER);
    }
}
