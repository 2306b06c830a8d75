//! Shared application state handed to every handler.

use std::sync::Arc;

use tracing::{error, info};

use rover_core::{Rover, TileSource};
use rover_tiles::MbTilesStore;

use crate::config::{RoverConfig, ServerConfig};

/// Everything a request handler may touch.
///
/// The rover is the single serialization point for simulator state; the tile
/// source is shared read-only and may be queried from many blocking tasks at
/// once.
pub struct AppState {
    pub rover: Rover,
    pub tiles: Arc<dyn TileSource>,
    pub server: ServerConfig,
}

impl AppState {
    pub fn new(rover: Rover, tiles: Arc<dyn TileSource>, server: ServerConfig) -> Self {
        Self { rover, tiles, server }
    }

    /// Build the state described by `config`.
    ///
    /// An archive that cannot be opened does not stop the server: the error
    /// is logged and a detached store serves every tile as empty.
    pub fn from_config(config: &RoverConfig) -> Self {
        let archive = &config.tiles.archive;
        let store = match MbTilesStore::open(archive, config.tiles.pool_size) {
            Ok(store) => store,
            Err(e) => {
                error!(error = %e, "tile archive unusable; serving empty tiles");
                MbTilesStore::detached(archive.clone())
            }
        };

        if store.is_attached() {
            match store.metadata() {
                Ok(metadata) => info!(
                    path = %archive.display(),
                    name = metadata.get("name").map(String::as_str).unwrap_or("-"),
                    format = metadata.get("format").map(String::as_str).unwrap_or("-"),
                    "tile archive opened"
                ),
                Err(e) => error!(error = %e, "tile archive metadata unreadable"),
            }
        }

        let rover = Rover::new(config.initial_state(), config.navigation_params());
        Self::new(rover, Arc::new(store), config.server.clone())
    }
}
