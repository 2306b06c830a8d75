//! Trait seam between the HTTP layer and tile storage.

use std::collections::BTreeMap;

use rover_contracts::{
    error::RoverResult,
    tile::{TileCoordinate, TileRecord},
};

/// A read-only source of map tiles addressed in XYZ convention.
///
/// Implementations must be safe to call from many threads at once; tile
/// lookups carry no shared mutable state.
pub trait TileSource: Send + Sync {
    /// Look up the tile at `coord`.
    ///
    /// `Ok(None)` means there is no tile at that address (or no archive at
    /// all). That is a normal empty result, not an error. `Err` is reserved
    /// for an archive that exists but cannot be read.
    fn get(&self, coord: TileCoordinate) -> RoverResult<Option<TileRecord>>;

    /// Archive-level name/value metadata. Empty when there is no archive.
    fn metadata(&self) -> RoverResult<BTreeMap<String, String>>;
}
