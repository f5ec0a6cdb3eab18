//! Player build pipeline.
//!
//! This module turns a [`BuildTarget`] and a set of [`BuildOptions`] into a
//! finished player by way of a [`BuildBackend`].
//!
//! # Supported Targets
//!
//! | Target | Output | Notes |
//! |--------|--------|-------|
//! | WebGL | `Build/WebGL/<product>` | compression disabled, version from `BUILD_VERSION` |
//! | Android APK | `Build/Android/<product>.apk` | development build, LZ4HC, debug key |
//! | Android AAB | `Build/Android/<product>` | App Bundle, configured keystore |
//!
//! # Backends
//!
//! The engine is never driven directly. [`CommandBackend`] runs an engine
//! executable in batch mode; [`DryRunBackend`] only records what would be
//! built.

#![warn(missing_docs)]

mod backend;
mod builder;
mod error;
mod options;
pub mod platform;
pub mod reveal;
pub mod utils;

// Public re-exports
pub use backend::{BuildBackend, BuildReport, BuildRequest, CommandBackend, DryRunBackend};
pub use builder::{BUILD_DIR, BuildOutcome, PlayerBuilder, RevealMode, resolve_output_path};
pub use error::{Context, Error, ErrorExt, Result};
pub use options::{BuildFlags, BuildOptions, Compression, Packaging, SigningConfig};
pub use platform::{BuildTarget, TargetGroup};
pub use reveal::HostOs;
