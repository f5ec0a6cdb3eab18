//! # Player Release
//!
//! Release builds for game engine players.
//!
//! This crate resolves per-target output paths, applies version bumps and
//! per-platform player settings, hands the build to the engine through a
//! [`BuildBackend`], and cleans up around it.
//!
//! ## Features
//!
//! - **Targets**: WebGL, Android APK (development) and Android App Bundle
//! - **Explicit settings**: player settings are a value loaded from TOML and
//!   written back without losing comments
//! - **Pluggable backend**: run the engine in batch mode, or dry-run
//! - **Housekeeping**: stale remote catalogs cleared, server data staged,
//!   output revealed in the host file browser
//!
//! ## Usage
//!
//! ```bash
//! player_release build webgl                  # BUILD_VERSION or 0.0.1
//! player_release build android-apk --dry-run  # show what would be built
//! player_release bump                         # increase version numbers
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;
pub mod error;
pub mod settings;
pub mod version;

// Re-export main types for public API
pub use bundler::{
    BuildBackend, BuildOptions, BuildOutcome, BuildTarget, CommandBackend, DryRunBackend,
    PlayerBuilder,
};
pub use cli::Args;
pub use error::{ReleaseError, Result};
pub use settings::{PlayerSettings, SettingsStore};
pub use version::{VersionString, bump_version, resolve_bundle_version};
