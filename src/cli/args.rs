//! Command line argument parsing and validation.

use crate::bundler::BuildTarget;
use crate::error::CliError;
use crate::settings::default_settings_path;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Release builds for game engine players
#[derive(Parser, Debug)]
#[command(
    name = "player_release",
    version,
    about = "Release builds for game engine players",
    long_about = "Build WebGL and Android players through the engine's batch-mode pipeline.

Usage:
  player_release build webgl
  BUILD_VERSION=2.3.4 player_release build webgl --copy-server-data
  player_release --engine unity build android-apk
  player_release bump"
)]
pub struct Args {
    /// Project root containing Assets/ and ProjectSettings/
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub project: PathBuf,

    /// Settings file (default: <project>/ProjectSettings/player.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Engine executable used for builds
    #[arg(long, global = true, env = "PLAYER_RELEASE_ENGINE", value_name = "EXE")]
    pub engine: Option<String>,

    /// Extra argument passed to the engine (repeatable)
    #[arg(
        long = "engine-arg",
        global = true,
        value_name = "ARG",
        allow_hyphen_values = true
    )]
    pub engine_args: Vec<String>,

    /// Do not open the file browser after a build
    #[arg(long, global = true)]
    pub no_reveal: bool,

    /// Record the build request without running the engine
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Show detail output and recovery suggestions
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a player for one target
    Build {
        /// Target to build
        #[arg(value_enum)]
        target: TargetArg,

        /// Stage ServerData/<platform> next to a WebGL player
        #[arg(long)]
        copy_server_data: bool,

        /// Bundle version for WebGL builds (replaces, does not increment)
        #[arg(long = "bundle-version", env = "BUILD_VERSION", value_name = "VERSION")]
        version_override: Option<String>,
    },

    /// Increase bundle version, Android version code and iOS build number
    Bump,
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Build { .. } => "build",
            Command::Bump => "bump",
        }
    }
}

/// Build target as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetArg {
    /// Android App Bundle
    AndroidAab,
    /// Development APK
    AndroidApk,
    /// WebGL player
    Webgl,
}

impl From<TargetArg> for BuildTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::AndroidAab => BuildTarget::AndroidAab,
            TargetArg::AndroidApk => BuildTarget::AndroidApk,
            TargetArg::Webgl => BuildTarget::WebGl,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        if let Command::Build {
            target,
            copy_server_data: true,
            ..
        } = &self.command
            && *target != TargetArg::Webgl
        {
            return Err(CliError::InvalidArguments {
                reason: "--copy-server-data only applies to webgl builds".to_string(),
            });
        }

        if let Some(engine) = &self.engine
            && engine.trim().is_empty()
        {
            return Err(CliError::InvalidArguments {
                reason: "--engine must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Settings file in effect
    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(|| default_settings_path(&self.project))
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
    /// Project root
    pub project_root: PathBuf,
    /// Settings file
    pub settings_path: PathBuf,
    /// Reveal artifacts after building
    pub reveal: bool,
    /// Record requests only
    pub dry_run: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
            project_root: args.project.clone(),
            settings_path: args.settings_path(),
            reveal: !args.no_reveal,
            dry_run: args.dry_run,
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Check if verbose output is enabled
    pub fn is_verbose(&self) -> bool {
        self.output.is_verbose()
    }
}
