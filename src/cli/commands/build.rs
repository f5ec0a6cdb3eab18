//! Build command implementation.

use super::EXIT_SKIPPED;
use crate::bundler::{
    BuildBackend, BuildOptions, BuildOutcome, BuildTarget, CommandBackend, DryRunBackend,
    PlayerBuilder, RevealMode,
};
use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{CliError, Result};
use crate::settings::SettingsStore;

/// Execute build command
pub(super) async fn execute_build(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let Command::Build {
        target,
        copy_server_data,
        version_override,
    } = &args.command
    else {
        unreachable!("execute_build called with non-Build command");
    };
    let target = BuildTarget::from(*target);

    let store = SettingsStore::new(&config.settings_path);
    let settings = store.load()?;
    config.verbose_println(&format!(
        "Loaded settings from {}",
        store.path().display()
    ));

    let requested = BuildOptions {
        copy_server_data: *copy_server_data,
        version_override: version_override.clone(),
        ..BuildOptions::default()
    };

    let _ = config.output().section(&format!("Building {target}"));

    if config.dry_run {
        let builder = PlayerBuilder::new(DryRunBackend::new(), settings, &config.project_root)
            .with_reveal(RevealMode::Disabled);
        return run_build(builder, target, &requested, config, None).await;
    }

    let engine = args
        .engine
        .as_deref()
        .ok_or_else(|| CliError::MissingArgument {
            argument: "--engine".to_string(),
        })?;
    let backend = CommandBackend::new(engine, args.engine_args.clone(), &config.project_root)?;
    let reveal = if config.reveal {
        RevealMode::detect()
    } else {
        RevealMode::Disabled
    };
    let builder =
        PlayerBuilder::new(backend, settings, &config.project_root).with_reveal(reveal);
    run_build(builder, target, &requested, config, Some(&store)).await
}

/// Run one build and report it; settings are saved only when `store` is given
/// and the build succeeded.
async fn run_build<B: BuildBackend>(
    mut builder: PlayerBuilder<B>,
    target: BuildTarget,
    requested: &BuildOptions,
    config: &RuntimeConfig,
    store: Option<&SettingsStore>,
) -> Result<i32> {
    let _ = config.output().progress(&format!(
        "Running {} backend for {target}",
        builder.backend().name()
    ));

    match builder.build(target, requested).await? {
        BuildOutcome::Skipped { reason, .. } => {
            config.warning_println(&format!("Build skipped: {reason}"));
            config.indent("Set product_name in the settings file to enable builds");
            Ok(EXIT_SKIPPED)
        }
        BuildOutcome::Built {
            report,
            options,
            staged_files,
            revealed,
        } => {
            let settings = builder.into_settings();
            if let Some(store) = store {
                store.save(&settings)?;
            }

            config.success_println(&format!(
                "Built {target} {} → {}",
                settings.bundle_version,
                report.output_path.display()
            ));
            config.indent(&format!("Options: {}", options.flags()));
            if report.size > 0 {
                config.indent(&format!("Size: {} bytes", report.size));
            }
            if let Some(checksum) = &report.checksum {
                config.indent(&format!("SHA256: {checksum}"));
            }
            if let Some(message) = &report.message {
                config.indent(message);
            }
            if staged_files > 0 {
                config.indent(&format!("Staged {staged_files} server data file(s)"));
            }
            if revealed {
                config.verbose_println("Opened output location");
            }
            Ok(0)
        }
    }
}
