//! The MBTiles schema and archive initialisation.
//!
//! Only the two tables the server reads are created: `metadata` (name/value,
//! unique on name) and `tiles` (unique on zoom/column/row). An archive made
//! here serves every tile as absent until a tile builder fills it.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::info;

use rover_contracts::error::{RoverError, RoverResult};

/// DDL for an empty MBTiles archive.
pub const MBTILES_SCHEMA: &str = "
    CREATE TABLE metadata (name text, value text);
    CREATE TABLE tiles (zoom_level integer, tile_column integer, tile_row integer, tile_data blob);
    CREATE UNIQUE INDEX name ON metadata (name);
    CREATE UNIQUE INDEX tile_index ON tiles (zoom_level, tile_column, tile_row);
";

pub(crate) const SELECT_TILE: &str =
    "SELECT tile_data FROM tiles WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3";

pub(crate) const SELECT_METADATA: &str = "SELECT name, value FROM metadata";

/// Create a new, empty MBTiles archive at `path`.
///
/// Writes metadata `name = <name>` and `format = pbf`. Refuses to touch an
/// existing file.
pub fn init_archive(path: &Path, name: &str) -> RoverResult<()> {
    if path.exists() {
        return Err(RoverError::ArchiveInit {
            reason: format!("'{}' already exists", path.display()),
        });
    }

    let init_err = |e: rusqlite::Error| RoverError::ArchiveInit {
        reason: format!("'{}': {}", path.display(), e),
    };

    let conn = Connection::open(path).map_err(init_err)?;
    conn.execute_batch(MBTILES_SCHEMA).map_err(init_err)?;
    conn.execute(
        "INSERT INTO metadata (name, value) VALUES (?1, ?2)",
        params!["name", name],
    )
    .map_err(init_err)?;
    conn.execute(
        "INSERT INTO metadata (name, value) VALUES (?1, ?2)",
        params!["format", "pbf"],
    )
    .map_err(init_err)?;

    info!(path = %path.display(), name, "initialised empty tile archive");
    Ok(())
}
