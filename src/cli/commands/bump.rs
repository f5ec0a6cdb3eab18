//! Bump command implementation.
//!
//! Increases the bundle version, the Android version code and the iOS build
//! number in the settings file.

use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::settings::SettingsStore;
use crate::version::increase_version_numbers;

/// Execute bump command
pub(super) async fn execute_bump(config: &RuntimeConfig) -> Result<()> {
    let store = SettingsStore::new(&config.settings_path);
    let mut settings = store.load()?;
    let previous = settings.bundle_version.clone();

    let numbers = increase_version_numbers(&mut settings)?;

    if config.dry_run {
        config.warning_println("Dry run: settings file left unchanged");
    } else {
        store.save(&settings)?;
    }

    config.success_println(&format!(
        "Bundle version {previous} → {}",
        numbers.bundle_version
    ));
    config.indent(&format!(
        "Android version code: {}",
        numbers.android_version_code
    ));
    config.indent(&format!("iOS build number: {}", numbers.ios_build_number));
    Ok(())
}
