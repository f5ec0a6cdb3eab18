//! WebGL flow.

use crate::bundler::options::BuildOptions;
use crate::error::Result;
use crate::settings::{PlayerSettings, WebGlCompression};
use crate::version::resolve_bundle_version;

/// Directory the auxiliary server data is staged under, relative to the player output
pub const STREAMING_ASSETS_DIR: &str = "StreamingAssets/bb";

/// Source of the auxiliary server data, relative to the project root
pub const SERVER_DATA_DIR: &str = "ServerData";

/// Apply WebGL settings and return the effective options.
///
/// The bundle version is replaced by the operator's override (or the
/// default) rather than incremented. Compression is turned off so the
/// browser does not have to unpack the player on load.
pub fn prepare(settings: &mut PlayerSettings, requested: &BuildOptions) -> Result<BuildOptions> {
    let version = resolve_bundle_version(requested.version_override.as_deref());
    log::info!("WebGL bundle version: {version}");
    settings.bundle_version = version;
    settings.webgl.compression_format = WebGlCompression::Disabled;
    settings.splash_screen_show = false;

    Ok(BuildOptions {
        copy_server_data: requested.copy_server_data,
        version_override: requested.version_override.clone(),
        ..BuildOptions::default()
    })
}
