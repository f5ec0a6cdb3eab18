//! Release orchestration.
//!
//! [`PlayerBuilder`] drives one end-to-end player build:
//!
//! 1. Resolves the output path for the target
//! 2. Applies the platform flow to the [`PlayerSettings`] it owns
//! 3. Clears the stale remote catalog, if one is regenerated
//! 4. Delegates to the [`BuildBackend`] and waits for it
//! 5. Stages auxiliary server data when asked to
//! 6. Reveals the artifact in the host file browser
//!
//! # Example
//!
//! ```no_run
//! use player_release::bundler::{BuildOptions, BuildTarget, DryRunBackend, PlayerBuilder, RevealMode};
//! use player_release::settings::PlayerSettings;
//!
//! # async fn example() -> player_release::Result<()> {
//! let mut builder = PlayerBuilder::new(DryRunBackend::new(), PlayerSettings::default(), ".")
//!     .with_reveal(RevealMode::Disabled);
//! let outcome = builder.build(BuildTarget::WebGl, &BuildOptions::default()).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

use crate::bundler::backend::{BuildBackend, BuildReport, BuildRequest};
use crate::bundler::error::Error;
use crate::bundler::options::{BuildFlags, BuildOptions};
use crate::bundler::platform::{BuildTarget, android, webgl};
use crate::bundler::reveal::{self, HostOs};
use crate::bundler::utils::fs::{clear_stale_folder, copy_tree};
use crate::error::Result;
use crate::settings::PlayerSettings;
use std::path::{Path, PathBuf};

/// Root of every output path, relative to the project
pub const BUILD_DIR: &str = "Build";

/// Output path for `target`: `Build/{platform}/{product_name}`, plus `.apk`
/// for APK packaging.
///
/// Returns `None` when the product name is blank; nothing should be built
/// into a bare platform folder.
pub fn resolve_output_path(target: BuildTarget, product_name: &str) -> Option<PathBuf> {
    let product_name = product_name.trim();
    if product_name.is_empty() {
        return None;
    }

    let file_name = match target.output_suffix() {
        Some(suffix) => format!("{product_name}{suffix}"),
        None => product_name.to_string(),
    };
    Some(
        Path::new(BUILD_DIR)
            .join(target.platform_dir())
            .join(file_name),
    )
}

/// Whether and where to reveal finished builds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealMode {
    /// Reveal with the strategy for this host
    Host(HostOs),
    /// Leave the file browser alone
    Disabled,
}

impl RevealMode {
    /// Reveal on the running host, if it has a known file browser.
    pub fn detect() -> Self {
        HostOs::current().map_or(RevealMode::Disabled, RevealMode::Host)
    }
}

/// Result of [`PlayerBuilder::build`].
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    /// The backend produced an artifact
    Built {
        /// Backend report
        report: BuildReport,
        /// Effective options the backend built with
        options: BuildOptions,
        /// Server data files staged next to the player
        staged_files: u64,
        /// Whether the file browser was opened
        revealed: bool,
    },
    /// Nothing was attempted
    Skipped {
        /// Target that was requested
        target: BuildTarget,
        /// Why the build was skipped
        reason: String,
    },
}

/// The release orchestrator.
#[derive(Debug)]
pub struct PlayerBuilder<B> {
    backend: B,
    settings: PlayerSettings,
    project_root: PathBuf,
    reveal: RevealMode,
}

impl<B: BuildBackend> PlayerBuilder<B> {
    /// Create an orchestrator that reveals outputs on the running host.
    pub fn new(backend: B, settings: PlayerSettings, project_root: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            settings,
            project_root: project_root.into(),
            reveal: RevealMode::detect(),
        }
    }

    /// Override how finished builds are revealed.
    pub fn with_reveal(mut self, reveal: RevealMode) -> Self {
        self.reveal = reveal;
        self
    }

    /// Settings as mutated by the builds so far
    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Consume the builder, returning its settings for saving
    pub fn into_settings(self) -> PlayerSettings {
        self.settings
    }

    /// The backend in use
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Output path for `target`, relative to the project root.
    pub fn resolve_output_path(&self, target: BuildTarget) -> Option<PathBuf> {
        resolve_output_path(target, &self.settings.product_name)
    }

    /// Clear the remote catalog folder if the next build regenerates it.
    ///
    /// Returns whether the catalog is part of the build.
    pub async fn clear_remote_catalog(&self) -> Result<bool> {
        let Some(catalog) = self.settings.asset_bundles.remote_catalog_path() else {
            return Ok(false);
        };
        clear_stale_folder(&self.project_root.join(catalog)).await?;
        Ok(true)
    }

    /// Run the full flow for `target`.
    ///
    /// `requested` carries the operator's toggles; each platform flow derives
    /// the options it actually builds with, which come back in
    /// [`BuildOutcome::Built`].
    pub async fn build(
        &mut self,
        target: BuildTarget,
        requested: &BuildOptions,
    ) -> Result<BuildOutcome> {
        let Some(relative_output) = self.resolve_output_path(target) else {
            let reason = Error::EmptyOutputPath {
                target: target.to_string(),
            }
            .to_string();
            log::warn!("Skipping {target} build: {reason}");
            return Ok(BuildOutcome::Skipped { target, reason });
        };
        let output_path = self.project_root.join(&relative_output);

        let options = match target {
            BuildTarget::WebGl => webgl::prepare(&mut self.settings, requested)?,
            BuildTarget::AndroidAab => android::prepare_app_bundle(&mut self.settings)?,
            BuildTarget::AndroidApk => android::prepare_apk(&mut self.settings)?,
        };

        let mut flags = options.flags();
        if self.clear_remote_catalog().await? {
            flags |= BuildFlags::INCLUDE_CATALOG;
        }

        let request =
            BuildRequest::new(target, output_path.clone(), flags, &options, &self.settings);

        log::info!(
            "Building {target} with {} backend into {}",
            self.backend.name(),
            relative_output.display()
        );
        let report = self.backend.build(&request).await?;
        if !report.success {
            return Err(Error::BuildFailed {
                target: target.to_string(),
                reason: report
                    .message
                    .clone()
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            }
            .into());
        }

        let staged_files = if target == BuildTarget::WebGl && options.copy_server_data {
            self.stage_server_data(target, &output_path).await?
        } else {
            0
        };

        let revealed = self.reveal_output(&output_path);

        Ok(BuildOutcome::Built {
            report,
            options,
            staged_files,
            revealed,
        })
    }

    async fn stage_server_data(&self, target: BuildTarget, output_path: &Path) -> Result<u64> {
        let source = self
            .project_root
            .join(webgl::SERVER_DATA_DIR)
            .join(target.platform_dir());
        let dest = output_path
            .join(webgl::STREAMING_ASSETS_DIR)
            .join(target.platform_dir());
        log::info!(
            "Staging server data {} -> {}",
            source.display(),
            dest.display()
        );
        Ok(copy_tree(&source, &dest).await?)
    }

    fn reveal_output(&self, output_path: &Path) -> bool {
        let RevealMode::Host(os) = self.reveal else {
            return false;
        };
        match reveal::reveal_output(os, output_path) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not reveal {}: {e}", output_path.display());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_template() {
        assert_eq!(
            resolve_output_path(BuildTarget::WebGl, "AR-Magic-Lite").unwrap(),
            PathBuf::from("Build/WebGL/AR-Magic-Lite")
        );
        assert_eq!(
            resolve_output_path(BuildTarget::AndroidAab, "AR-Magic-Lite").unwrap(),
            PathBuf::from("Build/Android/AR-Magic-Lite")
        );
    }

    #[test]
    fn apk_output_ends_with_apk() {
        let apk = resolve_output_path(BuildTarget::AndroidApk, "AR-Magic-Lite").unwrap();
        assert!(apk.to_string_lossy().ends_with(".apk"));

        let webgl = resolve_output_path(BuildTarget::WebGl, "AR-Magic-Lite").unwrap();
        assert!(!webgl.to_string_lossy().ends_with(".apk"));
    }

    #[test]
    fn blank_product_name_has_no_output() {
        assert!(resolve_output_path(BuildTarget::WebGl, "").is_none());
        assert!(resolve_output_path(BuildTarget::AndroidApk, "   ").is_none());
    }
}
