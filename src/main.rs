// src/main.rs
use clap::{CommandFactory, Parser};
use cricket_stats::cli::Args;
use cricket_stats::commands::{execute, handle_list_config_command, validate_args};
use cricket_stats::config::Config;
use cricket_stats::error::AppError;
use cricket_stats::logging::setup_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Validate argument combinations
    validate_args(&args)?;

    if args.list_config {
        return handle_list_config_command().await;
    }

    let Some(command) = args.command.as_ref() else {
        Args::command()
            .print_help()
            .map_err(|e| AppError::config_error(format!("Failed to print help: {e}")))?;
        return Ok(());
    };

    let config = Config::load().await?;

    // Keep the guard alive until main returns so buffered log lines are flushed
    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    info!("Logging to {log_file_path}");

    match execute(command, &config, args.retry).await {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {e}");
            Err(e)
        }
    }
}
