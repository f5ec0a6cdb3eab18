//! Reveal a build artifact in the host's file browser.
//!
//! Each host OS gets one [`RevealStrategy`] entry: the separator its browser
//! expects, the opener program, and how the path is passed. Strategies are
//! plain data, so every entry can be tested on any host.

use crate::bundler::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// Host operating systems with a known file browser.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HostOs {
    /// Explorer
    Windows,
    /// Finder
    MacOs,
    /// Whatever `xdg-open` is configured to use
    Linux,
}

impl HostOs {
    /// Detect the running OS at runtime.
    pub fn current() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(HostOs::Windows),
            "macos" => Some(HostOs::MacOs),
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Some(HostOs::Linux),
            _ => None,
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostOs::Windows => "windows",
            HostOs::MacOs => "macos",
            HostOs::Linux => "linux",
        };
        f.write_str(name)
    }
}

/// How one host reveals a path.
#[derive(Debug)]
pub struct RevealStrategy {
    /// Path separator the browser expects
    pub separator: char,
    /// Opener program
    pub program: &'static str,
    /// Argument prefix joined directly to the path (`/select,` for Explorer)
    pub path_prefix: &'static str,
    /// Arguments placed before the path
    pub leading_args: &'static [&'static str],
    /// The opener cannot select files, so open the containing folder instead
    pub opens_parent: bool,
}

static STRATEGIES: [(HostOs, RevealStrategy); 3] = [
    (
        HostOs::Windows,
        RevealStrategy {
            separator: '\\',
            program: "explorer",
            path_prefix: "/select,",
            leading_args: &[],
            opens_parent: false,
        },
    ),
    (
        HostOs::MacOs,
        RevealStrategy {
            separator: '/',
            program: "open",
            path_prefix: "",
            leading_args: &["-R"],
            opens_parent: false,
        },
    ),
    (
        HostOs::Linux,
        RevealStrategy {
            separator: '/',
            program: "xdg-open",
            path_prefix: "",
            leading_args: &[],
            opens_parent: true,
        },
    ),
];

/// Strategy entry for `os`.
pub fn strategy_for(os: HostOs) -> &'static RevealStrategy {
    // Every HostOs variant has an entry
    let (_, strategy) = STRATEGIES
        .iter()
        .find(|(host, _)| *host == os)
        .unwrap_or(&STRATEGIES[STRATEGIES.len() - 1]);
    strategy
}

/// Rewrite every `/` or `\` in `path` to `separator`.
pub fn normalize_separators(path: &str, separator: char) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { separator } else { c })
        .collect()
}

/// Program and arguments that reveal `path` on `os`.
///
/// `is_file` decides whether hosts that cannot select a file open the parent
/// folder instead.
pub fn reveal_command(os: HostOs, path: &Path, is_file: bool) -> (&'static str, Vec<String>) {
    let strategy = strategy_for(os);
    let target = match (strategy.opens_parent && is_file, path.parent()) {
        (true, Some(parent)) if !parent.as_os_str().is_empty() => parent,
        _ => path,
    };

    let normalized = normalize_separators(&target.to_string_lossy(), strategy.separator);
    let mut args: Vec<String> = strategy.leading_args.iter().map(|a| a.to_string()).collect();
    args.push(format!("{}{normalized}", strategy.path_prefix));
    (strategy.program, args)
}

/// Open the host file browser on `path`.
///
/// The opener is spawned and not waited on; Explorer in particular exits
/// with a non-zero status even when it succeeds.
pub fn reveal_output(os: HostOs, path: &Path) -> Result<()> {
    let (program, args) = reveal_command(os, path, path.is_file());
    let program_path = which::which(program).map_err(|e| {
        Error::GenericError(format!("cannot reveal output, '{program}' not found: {e}"))
    })?;

    log::info!("Revealing {} with {program}", path.display());
    std::process::Command::new(program_path)
        .args(&args)
        .spawn()
        .map_err(|error| Error::CommandFailed {
            command: program.to_string(),
            error,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_host_has_a_strategy() {
        for os in [HostOs::Windows, HostOs::MacOs, HostOs::Linux] {
            let found = STRATEGIES.iter().filter(|(host, _)| *host == os).count();
            assert_eq!(found, 1, "{os} should have exactly one strategy");
        }
    }

    #[test]
    fn windows_uses_backslashes() {
        let (program, args) =
            reveal_command(HostOs::Windows, Path::new("Build/Android/AR-Magic-Lite.apk"), true);
        assert_eq!(program, "explorer");
        assert_eq!(args, vec!["/select,Build\\Android\\AR-Magic-Lite.apk".to_string()]);
    }

    #[test]
    fn macos_selects_in_finder() {
        let (program, args) =
            reveal_command(HostOs::MacOs, Path::new("Build/WebGL/AR-Magic-Lite"), false);
        assert_eq!(program, "open");
        assert_eq!(args, vec!["-R".to_string(), "Build/WebGL/AR-Magic-Lite".to_string()]);
    }

    #[test]
    fn linux_opens_parent_of_files() {
        let (_, args) =
            reveal_command(HostOs::Linux, Path::new("Build/Android/AR-Magic-Lite.apk"), true);
        assert_eq!(args, vec!["Build/Android".to_string()]);

        let (_, args) =
            reveal_command(HostOs::Linux, Path::new("Build/WebGL/AR-Magic-Lite"), false);
        assert_eq!(args, vec!["Build/WebGL/AR-Magic-Lite".to_string()]);
    }

    #[test]
    fn normalize_handles_mixed_separators() {
        assert_eq!(normalize_separators("a/b\\c", '/'), "a/b/c");
        assert_eq!(normalize_separators("a/b\\c", '\\'), "a\\b\\c");
    }
}
