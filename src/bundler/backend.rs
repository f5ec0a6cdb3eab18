//! Build backend: the engine pipeline that actually produces a player.
//!
//! The orchestrator only depends on [`BuildBackend`]. Two adapters ship with
//! the crate:
//!
//! - [`CommandBackend`] runs the engine executable in batch mode and hands it
//!   the request as a JSON file.
//! - [`DryRunBackend`] records requests without building anything.

use crate::bail;
use crate::bundler::error::{Context, Error, ErrorExt, Result};
use crate::bundler::options::{BuildFlags, BuildOptions, Packaging, SigningConfig};
use crate::bundler::platform::{BuildTarget, TargetGroup};
use crate::settings::PlayerSettings;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Everything the backend needs to build one player.
#[derive(Debug, Clone, Serialize)]
pub struct BuildRequest {
    /// Target being built
    pub target: BuildTarget,
    /// Platform family of the target
    pub target_group: TargetGroup,
    /// Scene list, first scene loads on start
    pub scenes: Vec<String>,
    /// Where the player is written
    pub output_path: PathBuf,
    /// Backend option bitmask
    pub flags: BuildFlags,
    /// Android packaging; ignored by non-Android targets
    pub packaging: Packaging,
    /// Keystore to sign with, `None` for the engine's debug key
    pub signing: Option<SigningConfig>,
    /// Player settings in effect for this build, without the stored keystore
    pub settings: PlayerSettings,
}

impl BuildRequest {
    /// Request for `target` built with the effective `options`.
    ///
    /// The stored `[android.signing]` table is stripped from the settings
    /// snapshot; only `options.signing` reaches the backend.
    pub fn new(
        target: BuildTarget,
        output_path: PathBuf,
        flags: BuildFlags,
        options: &BuildOptions,
        settings: &PlayerSettings,
    ) -> Self {
        let mut settings = settings.clone();
        settings.android.signing = None;

        Self {
            target,
            target_group: target.group(),
            scenes: settings.scenes.clone(),
            output_path,
            flags,
            packaging: options.packaging,
            signing: options.signing.clone(),
            settings,
        }
    }
}

/// Outcome reported by a backend.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Target that was built
    pub target: BuildTarget,
    /// Where the artifact lives
    pub output_path: PathBuf,
    /// Whether the backend considers the build successful
    pub success: bool,
    /// Failure reason or backend summary
    pub message: Option<String>,
    /// Total size of the artifact in bytes
    pub size: u64,
    /// SHA-256 of the artifact when it is a single file
    pub checksum: Option<String>,
    /// When the backend returned
    pub finished_at: DateTime<Utc>,
}

impl BuildReport {
    /// Report for a successful build, measuring the artifact on disk.
    pub fn from_artifact(target: BuildTarget, output_path: &Path) -> Result<Self> {
        let (size, checksum) = if output_path.is_file() {
            let bytes =
                std::fs::read(output_path).fs_context("reading artifact", output_path)?;
            (bytes.len() as u64, Some(hex::encode(Sha256::digest(&bytes))))
        } else if output_path.is_dir() {
            let mut total = 0u64;
            for entry in walkdir::WalkDir::new(output_path) {
                let entry = entry?;
                if entry.file_type().is_file() {
                    total += entry
                        .metadata()
                        .map_err(Error::from)
                        .context("measuring artifact")?
                        .len();
                }
            }
            (total, None)
        } else {
            return Err(Error::BuildFailed {
                target: target.to_string(),
                reason: format!("no artifact at {}", output_path.display()),
            });
        };

        Ok(Self {
            target,
            output_path: output_path.to_path_buf(),
            success: true,
            message: None,
            size,
            checksum,
            finished_at: Utc::now(),
        })
    }

    /// Report for a failed build.
    pub fn failed(target: BuildTarget, output_path: &Path, reason: impl Into<String>) -> Self {
        Self {
            target,
            output_path: output_path.to_path_buf(),
            success: false,
            message: Some(reason.into()),
            size: 0,
            checksum: None,
            finished_at: Utc::now(),
        }
    }
}

/// Engine build pipeline.
///
/// Implementations block the calling flow until the build is finished; there
/// is no cancellation and no timeout.
pub trait BuildBackend {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Build one player.
    ///
    /// A build the engine ran but rejected is reported with
    /// `success == false`; `Err` is reserved for failing to run the engine.
    fn build(&self, request: &BuildRequest) -> impl Future<Output = Result<BuildReport>>;
}

/// Runs the engine executable once per build.
///
/// The command line is `<executable> <args...> --build-request <file>`, run
/// from the project root. The request file is JSON and lives under
/// `Build/requests/`.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    executable: PathBuf,
    args: Vec<String>,
    project_root: PathBuf,
}

impl CommandBackend {
    /// Resolve `executable` (a path or a name on `PATH`) and create the backend.
    pub fn new(
        executable: &str,
        args: Vec<String>,
        project_root: impl Into<PathBuf>,
    ) -> Result<Self> {
        if executable.trim().is_empty() {
            bail!("engine executable must not be empty");
        }
        let resolved = which::which(executable).map_err(|e| {
            Error::GenericError(format!("engine executable '{executable}' not found: {e}"))
        })?;
        log::debug!("Using engine at {}", resolved.display());

        Ok(Self {
            executable: resolved,
            args,
            project_root: project_root.into(),
        })
    }

    /// Path of the request file written for `target`
    pub fn request_path(&self, target: BuildTarget) -> PathBuf {
        self.project_root
            .join("Build")
            .join("requests")
            .join(format!("{}.json", target.short_name()))
    }

    async fn write_request(&self, request: &BuildRequest) -> Result<PathBuf> {
        let path = self.request_path(request.target);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating request directory", parent)?;
        }
        let json = serde_json::to_vec_pretty(request)?;
        tokio::fs::write(&path, json)
            .await
            .fs_context("writing build request", &path)?;
        Ok(path)
    }
}

impl BuildBackend for CommandBackend {
    fn name(&self) -> &str {
        "command"
    }

    async fn build(&self, request: &BuildRequest) -> Result<BuildReport> {
        let request_path = self.write_request(request).await?;

        log::info!(
            "Running {} for {} ({})",
            self.executable.display(),
            request.target,
            request.flags
        );

        let output = tokio::process::Command::new(&self.executable)
            .args(&self.args)
            .arg("--build-request")
            .arg(&request_path)
            .current_dir(&self.project_root)
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: self.executable.display().to_string(),
                error,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("engine exited with {}", output.status),
                detail => format!("engine exited with {}:\n{detail}", output.status),
            };
            return Ok(BuildReport::failed(
                request.target,
                &request.output_path,
                reason,
            ));
        }

        log::debug!(
            "Engine output:\n{}",
            String::from_utf8_lossy(&output.stdout).trim_end()
        );
        BuildReport::from_artifact(request.target, &request.output_path)
    }
}

/// Records requests and reports success without producing artifacts.
#[derive(Debug, Default)]
pub struct DryRunBackend {
    requests: Mutex<Vec<BuildRequest>>,
}

impl DryRunBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<BuildRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl BuildBackend for DryRunBackend {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn build(&self, request: &BuildRequest) -> Result<BuildReport> {
        log::info!(
            "[dry-run] would build {} into {} ({})",
            request.target,
            request.output_path.display(),
            request.flags
        );
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        Ok(BuildReport {
            target: request.target,
            output_path: request.output_path.clone(),
            success: true,
            message: Some("dry run, nothing built".to_string()),
            size: 0,
            checksum: None,
            finished_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(target: BuildTarget, output_path: PathBuf) -> BuildRequest {
        BuildRequest::new(
            target,
            output_path,
            BuildFlags::empty(),
            &BuildOptions::default(),
            &PlayerSettings::default(),
        )
    }

    #[test]
    fn request_snapshot_drops_stored_keystore() {
        let mut settings = PlayerSettings::default();
        settings.android.signing = Some(SigningConfig {
            keystore_path: "release.keystore".into(),
            keystore_pass: "hunter2".into(),
            key_alias_name: "upload".into(),
            key_alias_pass: "hunter3".into(),
        });

        let request = BuildRequest::new(
            BuildTarget::AndroidApk,
            "Build/Android/AR-Magic-Lite.apk".into(),
            BuildFlags::DEVELOPMENT,
            &BuildOptions::default(),
            &settings,
        );
        let json = serde_json::to_string_pretty(&request).unwrap();
        assert!(request.signing.is_none());
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("keystore_path"));
    }

    #[test]
    fn report_checksums_single_file_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let apk = dir.path().join("AR-Magic-Lite.apk");
        std::fs::write(&apk, b"abc").unwrap();

        let report = BuildReport::from_artifact(BuildTarget::AndroidApk, &apk).unwrap();
        assert_eq!(report.size, 3);
        assert_eq!(
            report.checksum.as_deref(),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn report_sums_directory_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let player = dir.path().join("AR-Magic-Lite");
        std::fs::create_dir_all(player.join("Build")).unwrap();
        std::fs::write(player.join("index.html"), b"12345").unwrap();
        std::fs::write(player.join("Build/data"), b"123").unwrap();

        let report = BuildReport::from_artifact(BuildTarget::WebGl, &player).unwrap();
        assert_eq!(report.size, 8);
        assert!(report.checksum.is_none());
    }

    #[test]
    fn missing_artifact_is_a_build_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = BuildReport::from_artifact(BuildTarget::WebGl, &dir.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, Error::BuildFailed { .. }));
    }

    #[tokio::test]
    async fn dry_run_records_requests() {
        let backend = DryRunBackend::new();
        let report = backend
            .build(&request(BuildTarget::WebGl, "Build/WebGL/AR-Magic-Lite".into()))
            .await
            .unwrap();
        assert!(report.success);
        assert_eq!(backend.requests().len(), 1);
    }

    #[test]
    fn empty_executable_is_rejected() {
        assert!(CommandBackend::new("  ", Vec::new(), ".").is_err());
    }
}
