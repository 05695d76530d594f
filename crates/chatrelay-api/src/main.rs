//! chatrelay CLI and HTTP relay entry point.
//!
//! Binary name: `chatrelay`
//!
//! Parses CLI arguments, loads configuration, opens storage, then either
//! starts the relay server or runs a session maintenance command.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use chatrelay_infra::config::{load_config, resolve_data_dir};
use chatrelay_observe::tracing_setup::{init_tracing, shutdown_tracing};
use chatrelay_types::config::StorageBackend;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise verbosity picks the filter.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,chatrelay_api=debug,chatrelay_core=debug,chatrelay_infra=debug",
        _ => "trace",
    };
    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    init_tracing(filter, otel).map_err(|e| anyhow::anyhow!(e))?;

    // Shell completions don't need config or storage
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatrelay", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);
    let mut config = load_config(&data_dir).await;

    match cli.command {
        Commands::Serve {
            port,
            host,
            memory,
            otel: _,
        } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if memory {
                config.storage.backend = StorageBackend::Memory;
            }

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::init(&data_dir, config).await?;
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, data_dir = %state.data_dir.display(), "chatrelay listening");
            if !cli.quiet {
                println!(
                    "  {} chatrelay listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::History { session_id } => {
            let state = AppState::init_offline(&data_dir, config).await?;
            cli::session::show_history(&state, &session_id, cli.json).await?;
        }

        Commands::Reset { session_id } => {
            let state = AppState::init_offline(&data_dir, config).await?;
            cli::session::reset_session(&state, &session_id, cli.json, cli.quiet).await?;
        }

        Commands::Sessions => {
            let state = AppState::init_offline(&data_dir, config).await?;
            cli::session::list_sessions(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
