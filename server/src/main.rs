//! Rover tile server CLI.
//!
//! Serves vector tiles from an MBTiles archive alongside a simulated rover
//! that patrols the submitted mission.
//!
//! Usage:
//!   cargo run -p rover-server -- serve
//!   cargo run -p rover-server -- serve --config rover.toml --bind 127.0.0.1:9000
//!   cargo run -p rover-server -- init-archive dummy.mbtiles

use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rover_http::RoverConfig;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Offline map tile server with a simulated ground rover.
#[derive(Parser)]
#[command(name = "rover", about = "Offline vector tile server and rover simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve tiles, style, static frontend, and the rover API.
    Serve {
        /// TOML configuration file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override `server.bind`.
        #[arg(long)]
        bind: Option<SocketAddr>,
        /// Override `tiles.archive`.
        #[arg(long)]
        archive: Option<PathBuf>,
    },
    /// Create an empty MBTiles archive with the standard schema.
    InitArchive {
        /// Where to write the archive. Must not exist yet.
        path: PathBuf,
        /// Value of the `name` metadata entry.
        #[arg(long, default_value = "dummy-map")]
        name: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // RUST_LOG=debug also enables per-request traces.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve { config, bind, archive } => run_serve(config, bind, archive).await,
        Command::InitArchive { path, name } => run_init_archive(path, &name),
    };

    if let Err(e) = result {
        eprintln!("rover error: {:#}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn run_serve(
    config_path: Option<PathBuf>,
    bind: Option<SocketAddr>,
    archive: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => RoverConfig::from_file(&path)?,
        None => RoverConfig::default(),
    };
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(archive) = archive {
        config.tiles.archive = archive;
    }

    rover_http::serve(&config).await
}

fn run_init_archive(path: PathBuf, name: &str) -> anyhow::Result<()> {
    rover_tiles::init_archive(&path, name)?;
    println!("Created {}", path.display());
    Ok(())
}
