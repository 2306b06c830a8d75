//! # rover-http
//!
//! The HTTP surface of the rover tile server.
//!
//! | Method | Path                  | Purpose                                   |
//! |--------|-----------------------|-------------------------------------------|
//! | GET    | `/tiles/{z}/{x}/{y}`  | Vector tile bytes, 204 when absent        |
//! | GET    | `/style.json`         | Map style pointed at this server          |
//! | GET    | `/api/mission`        | Current mission as a GeoJSON polygon      |
//! | GET    | `/api/robot`          | One simulator tick, as a GeoJSON point    |
//! | POST   | `/api/waypoint`       | Single-target command (acknowledged only) |
//! | POST   | `/api/mission_start`  | Replace the mission plan                  |
//! | GET    | `/*`                  | Static frontend                           |

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod style;

use std::{future::Future, net::SocketAddr};

use tracing::info;

pub use config::RoverConfig;
pub use routes::build_router;
pub use state::AppState;

/// Bind `config.server.bind` and serve until ctrl-c.
pub async fn serve(config: &RoverConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    let state = AppState::from_config(config);
    serve_listener(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await?;
    Ok(())
}

/// Serve `state` on an already-bound listener until `shutdown` resolves.
pub async fn serve_listener(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<SocketAddr> {
    let addr = listener.local_addr()?;
    let app = build_router(state);

    info!(%addr, "rover server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("rover server stopped");
    Ok(addr)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
