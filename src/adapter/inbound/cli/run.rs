//! Handler for the `run` command.

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::infrastructure::exchange::VenueRegistry;
use crate::infrastructure::orchestration::run_with_shutdown;

/// Execute the run command.
///
/// Ctrl-C flips the shutdown channel; the file being processed at that
/// moment is finished before the loop exits.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    if let Some(level) = &args.log_level {
        config.logging = config.logging.with_level(level);
    }
    if args.json_logs {
        config.logging.format = "json".into();
    }
    if args.sweep_existing {
        config.sweep_existing = true;
    }

    config.logging.init();
    info!(config = %args.config.display(), "dropgate starting");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => info!("Interrupt received, finishing current file"),
            Err(e) => error!(error = %e, "Failed to listen for interrupt"),
        }
        let _ = shutdown_tx.send(true);
    });

    let summary = run_with_shutdown(config, VenueRegistry::with_defaults(), shutdown_rx).await?;
    info!(moved = summary.moved(), failed = summary.failed, "dropgate stopped");
    Ok(())
}
