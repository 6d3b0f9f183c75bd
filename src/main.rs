//! Catequesis CLI Entry Point
//!
//! Loads the credentials file, performs the single startup connection
//! attempt, and hands stdin/stdout to the interactive menu loop. Diagnostics
//! go to stderr via `tracing`; stdout carries only the console UI.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use catequesis::{config, ConnectionManager, Menu, RecordGateway};

/// Consola CRUD para el registro de catequizandos
#[derive(Parser)]
#[command(name = "catequesis")]
#[command(about = "Consola CRUD para el registro de catequizandos")]
#[command(version)]
struct Cli {
    /// Path to the credentials file (defaults to ./config.json, then the
    /// user config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // A missing or broken config degrades the process the same way a failed
    // connection does; the menu still runs, every operation reports the
    // missing connection.
    let manager = match config::resolve(cli.config.as_deref()) {
        Ok(db_config) => ConnectionManager::open(&db_config).await,
        Err(err) => ConnectionManager::degraded(err.message()),
    };

    if manager.is_open() {
        println!("Conexión exitosa a la base de datos.");
    } else {
        println!(
            "Error al conectar a la base de datos: {}",
            manager.startup_error().unwrap_or("error desconocido")
        );
    }

    let gateway = RecordGateway::new(manager);
    let mut menu = Menu::new(io::stdin().lock(), io::stdout(), gateway);
    menu.run().await.context("console I/O failure")?;

    if let Err(err) = menu.into_gateway().close().await {
        tracing::warn!("error closing the database connection: {}", err.message());
    }

    Ok(())
}
