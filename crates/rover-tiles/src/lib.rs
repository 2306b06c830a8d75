//! # rover-tiles
//!
//! MBTiles archive access for the rover tile server.
//!
//! ## Overview
//!
//! This crate provides [`MbTilesStore`], which implements the
//! [`TileSource`](rover_core::traits::TileSource) trait over a pooled,
//! read-only SQLite connection, and [`init_archive`] for creating an empty
//! archive with the standard schema.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use rover_contracts::tile::TileCoordinate;
//! use rover_core::TileSource;
//! use rover_tiles::MbTilesStore;
//!
//! let store = MbTilesStore::open("osm.mbtiles", 4)?;
//! if let Some(tile) = store.get(TileCoordinate::new(14, 2620, 6344))? {
//!     // tile.data, tile.is_compressed
//! }
//! ```
//!
//! ## Row convention
//!
//! Callers pass XYZ rows. The archive stores TMS rows; the store converts
//! with `(1 << z) - 1 - y` before querying.

pub mod schema;
pub mod store;

pub use schema::init_archive;
pub use store::{MbTilesStore, DEFAULT_POOL_SIZE};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use rusqlite::{params, Connection};
    use tempfile::TempDir;

    use rover_contracts::{error::RoverError, tile::TileCoordinate};
    use rover_core::traits::TileSource;

    use crate::{init_archive, MbTilesStore};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Create an empty archive inside `dir` and return its path.
    fn empty_archive(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("test.mbtiles");
        init_archive(&path, "test-map").unwrap();
        path
    }

    /// Insert a raw tile row. `tms_row` is stored as given.
    fn insert_tile(path: &Path, z: u8, x: u32, tms_row: u32, data: &[u8]) {
        let conn = Connection::open(path).unwrap();
        conn.execute(
            "INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)",
            params![z, x, tms_row, data],
        )
        .unwrap();
    }

    // ── Lookups ───────────────────────────────────────────────────────────────

    /// An archive with no rows answers absent for the root tile.
    #[test]
    fn test_empty_archive_has_no_root_tile() {
        let dir = TempDir::new().unwrap();
        let store = MbTilesStore::open(empty_archive(&dir), 2).unwrap();

        assert!(store.is_attached());
        assert_eq!(store.get(TileCoordinate::new(0, 0, 0)).unwrap(), None);
    }

    /// The XYZ row is flipped to TMS before the query.
    #[test]
    fn test_lookup_converts_xyz_row_to_tms() {
        let dir = TempDir::new().unwrap();
        let path = empty_archive(&dir);
        // z=2, XYZ row 0 is TMS row 3.
        insert_tile(&path, 2, 1, 3, b"top-row");
        insert_tile(&path, 2, 1, 0, b"bottom-row");

        let store = MbTilesStore::open(&path, 2).unwrap();

        let top = store.get(TileCoordinate::new(2, 1, 0)).unwrap().unwrap();
        assert_eq!(top.data, b"top-row");

        let bottom = store.get(TileCoordinate::new(2, 1, 3)).unwrap().unwrap();
        assert_eq!(bottom.data, b"bottom-row");

        assert_eq!(store.get(TileCoordinate::new(2, 0, 0)).unwrap(), None);
    }

    /// Compression is classified from the stored bytes, never decoded.
    #[test]
    fn test_gzip_tiles_are_flagged_compressed() {
        let dir = TempDir::new().unwrap();
        let path = empty_archive(&dir);
        let gz = [0x1F, 0x8B, 0x08, 0x00, 0xDE, 0xAD];
        insert_tile(&path, 0, 0, 0, &gz);
        insert_tile(&path, 1, 0, 0, b"\x1a\x03raw");

        let store = MbTilesStore::open(&path, 2).unwrap();

        let compressed = store.get(TileCoordinate::new(0, 0, 0)).unwrap().unwrap();
        assert!(compressed.is_compressed);
        assert_eq!(compressed.data, gz);

        let plain = store.get(TileCoordinate::new(1, 0, 1)).unwrap().unwrap();
        assert!(!plain.is_compressed);
    }

    /// A row whose blob is empty or NULL is served the same as a missing row.
    #[test]
    fn test_empty_or_null_blob_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = empty_archive(&dir);
        insert_tile(&path, 0, 0, 0, b"");
        Connection::open(&path)
            .unwrap()
            .execute(
                "INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (1, 1, 1, NULL)",
                [],
            )
            .unwrap();

        let store = MbTilesStore::open(&path, 2).unwrap();

        assert_eq!(store.get(TileCoordinate::new(0, 0, 0)).unwrap(), None);
        assert_eq!(store.get(TileCoordinate::new(1, 1, 0)).unwrap(), None);
    }

    /// Coordinates outside the 2^z grid never reach the database.
    #[test]
    fn test_out_of_grid_coordinate_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = MbTilesStore::open(empty_archive(&dir), 1).unwrap();

        assert_eq!(store.get(TileCoordinate::new(1, 0, 2)).unwrap(), None);
        assert_eq!(store.get(TileCoordinate::new(1, 5, 0)).unwrap(), None);
    }

    /// Many threads can read through the pool at once.
    #[test]
    fn test_parallel_lookups_share_the_pool() {
        let dir = TempDir::new().unwrap();
        let path = empty_archive(&dir);
        insert_tile(&path, 0, 0, 0, b"world");
        let store = MbTilesStore::open(&path, 2).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        let tile = store.get(TileCoordinate::new(0, 0, 0)).unwrap().unwrap();
                        assert_eq!(tile.data, b"world");
                    }
                });
            }
        });
    }

    // ── Missing / broken archives ─────────────────────────────────────────────

    /// A missing file yields a detached store that answers absent.
    #[test]
    fn test_missing_archive_is_detached_and_empty() {
        let dir = TempDir::new().unwrap();
        let store = MbTilesStore::open(dir.path().join("nope.mbtiles"), 2).unwrap();

        assert!(!store.is_attached());
        assert_eq!(store.get(TileCoordinate::new(0, 0, 0)).unwrap(), None);
        assert!(store.metadata().unwrap().is_empty());
    }

    /// A file that is not SQLite surfaces as an archive error, not a panic.
    #[test]
    fn test_corrupt_archive_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.mbtiles");
        std::fs::write(&path, b"not a sqlite database. ".repeat(200)).unwrap();

        match MbTilesStore::open(&path, 1) {
            Err(RoverError::ArchiveUnavailable { .. }) => {}
            Err(other) => panic!("expected ArchiveUnavailable, got {:?}", other),
            Ok(store) => {
                let result = store.get(TileCoordinate::new(0, 0, 0));
                assert!(
                    matches!(result, Err(RoverError::ArchiveQuery { .. })),
                    "expected ArchiveQuery, got {:?}",
                    result
                );
            }
        }
    }

    // ── Metadata and initialisation ───────────────────────────────────────────

    #[test]
    fn test_init_archive_writes_metadata() {
        let dir = TempDir::new().unwrap();
        let store = MbTilesStore::open(empty_archive(&dir), 1).unwrap();

        let metadata = store.metadata().unwrap();
        assert_eq!(metadata.get("name").map(String::as_str), Some("test-map"));
        assert_eq!(metadata.get("format").map(String::as_str), Some("pbf"));
    }

    #[test]
    fn test_init_archive_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = empty_archive(&dir);

        match init_archive(&path, "again") {
            Err(RoverError::ArchiveInit { reason }) => assert!(reason.contains("already exists")),
            other => panic!("expected ArchiveInit, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_enforces_unique_tile_index() {
        let dir = TempDir::new().unwrap();
        let path = empty_archive(&dir);
        insert_tile(&path, 0, 0, 0, b"a");

        let conn = Connection::open(&path).unwrap();
        let dup = conn.execute(
            "INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (0, 0, 0, x'00')",
            [],
        );
        assert!(dup.is_err(), "duplicate (z, x, row) must be rejected");
    }
}
