//! Ripple CLI binary.
//!
//! This is the entry point for the `ripple` command-line tool. It initializes
//! logging via `tracing`, parses arguments with `clap`, wires Ctrl-C to a
//! cancellation token and dispatches to the appropriate command handler.

mod cli;
mod commands;

use miette::Result;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Interrupted, cancelling feed queries");
            on_interrupt.cancel();
        }
    });

    commands::dispatch(args, &cancel).await
}
