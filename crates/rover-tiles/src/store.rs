//! Pooled, read-only access to an MBTiles archive.
//!
//! `MbTilesStore` keeps a long-lived r2d2 pool of read-only SQLite
//! connections. Every lookup borrows one connection for the duration of a
//! single query; dropping the pooled handle returns it to the pool.
//!
//! A store can also be *detached*: built for an archive path that does not
//! exist (or could not be opened). A detached store answers every lookup with
//! `Ok(None)`, which the HTTP layer serves as 204 No Content.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::Duration,
};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OpenFlags, OptionalExtension};
use tracing::{debug, warn};

use rover_contracts::{
    error::{RoverError, RoverResult},
    tile::{TileCoordinate, TileRecord},
};
use rover_core::traits::TileSource;

use crate::schema::{SELECT_METADATA, SELECT_TILE};

/// Default number of pooled connections.
pub const DEFAULT_POOL_SIZE: u32 = 4;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// A `TileSource` backed by an MBTiles (SQLite) archive.
pub struct MbTilesStore {
    path: PathBuf,
    pool: Option<Pool<SqliteConnectionManager>>,
}

impl MbTilesStore {
    /// Open the archive at `path` with a pool of up to `pool_size`
    /// connections.
    ///
    /// A missing file is not an error: the store comes back detached and a
    /// warning is logged once. `Err(ArchiveUnavailable)` means the file exists
    /// but the pool could not be built.
    pub fn open(path: impl AsRef<Path>, pool_size: u32) -> RoverResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            warn!(
                path = %path.display(),
                "tile archive not found; all tile requests will be empty"
            );
            return Ok(Self::detached(path));
        }

        let manager = SqliteConnectionManager::file(&path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX);

        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .min_idle(Some(1))
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)
            .map_err(|e| RoverError::ArchiveUnavailable {
                reason: format!("failed to open '{}': {}", path.display(), e),
            })?;

        debug!(path = %path.display(), pool_size, "tile archive pool ready");

        Ok(Self {
            path,
            pool: Some(pool),
        })
    }

    /// A store with no archive behind it. Every tile is absent.
    pub fn detached(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pool: None,
        }
    }

    /// True when the store has an open pool.
    pub fn is_attached(&self) -> bool {
        self.pool.is_some()
    }

    fn connection(&self) -> RoverResult<Option<PooledConnection<SqliteConnectionManager>>> {
        let Some(pool) = &self.pool else {
            return Ok(None);
        };
        pool.get().map(Some).map_err(|e| RoverError::ArchiveUnavailable {
            reason: format!("no pooled connection for '{}': {}", self.path.display(), e),
        })
    }

    fn query_err(&self, e: rusqlite::Error) -> RoverError {
        RoverError::ArchiveQuery {
            reason: format!("'{}': {}", self.path.display(), e),
        }
    }
}

impl TileSource for MbTilesStore {
    fn get(&self, coord: TileCoordinate) -> RoverResult<Option<TileRecord>> {
        let Some(tms_row) = coord.tms_row() else {
            debug!(z = coord.z, x = coord.x, y = coord.y, "tile coordinate outside grid");
            return Ok(None);
        };

        let Some(conn) = self.connection()? else {
            return Ok(None);
        };

        debug!(z = coord.z, x = coord.x, y = coord.y, tms_row, "tile lookup");

        let mut stmt = conn.prepare_cached(SELECT_TILE).map_err(|e| self.query_err(e))?;
        let data: Option<Option<Vec<u8>>> = stmt
            .query_row(params![coord.z, coord.x, tms_row], |row| row.get(0))
            .optional()
            .map_err(|e| self.query_err(e))?;

        // NULL and zero-length blobs are empty tiles.
        Ok(data.flatten().filter(|d| !d.is_empty()).map(TileRecord::new))
    }

    fn metadata(&self) -> RoverResult<BTreeMap<String, String>> {
        let Some(conn) = self.connection()? else {
            return Ok(BTreeMap::new());
        };

        let mut stmt = conn.prepare_cached(SELECT_METADATA).map_err(|e| self.query_err(e))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?)))
            .map_err(|e| self.query_err(e))?;

        let mut metadata = BTreeMap::new();
        for row in rows {
            let (name, value) = row.map_err(|e| self.query_err(e))?;
            metadata.insert(name, value.unwrap_or_default());
        }
        Ok(metadata)
    }
}
