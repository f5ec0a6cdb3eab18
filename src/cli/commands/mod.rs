//! Command execution.

mod build;
mod bump;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use build::execute_build;
use bump::execute_bump;

/// Exit code when a build was skipped instead of run
pub const EXIT_SKIPPED: i32 = 2;

/// Execute the command selected by `args` and return the process exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false, false);
        output.error(&validation_error.to_string());
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Build { .. } => execute_build(&args, &config).await,
        Command::Bump => execute_bump(&config).await.map(|()| 0),
    };

    match result {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed: {}",
                args.command.name(),
                e
            ));

            if !e.is_recoverable() {
                config.indent("Re-running unchanged will fail the same way");
            }

            if config.is_verbose() {
                let suggestions = e.recovery_suggestions();
                if !suggestions.is_empty() {
                    config.println("\n💡 Recovery suggestions:");
                    for suggestion in suggestions {
                        config.indent(&format!("• {suggestion}"));
                    }
                }
            }

            Ok(1)
        }
    }
}
