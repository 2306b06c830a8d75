//! Tile addressing and tile payload types.
//!
//! Callers address tiles in the XYZ (web/Google) convention, where rows grow
//! downward from the top. MBTiles archives store rows in the TMS convention,
//! where rows grow upward from the bottom. `TileCoordinate::tms_row` is the
//! only place the two are converted.

/// The two leading bytes of every gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Highest zoom level whose row count still fits in a `u32`.
pub const MAX_ZOOM: u8 = 31;

/// A request-scoped tile address in XYZ convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    /// Zoom level, 0 = whole world in one tile.
    pub z: u8,
    /// Column, 0 at the antimeridian, growing eastward.
    pub x: u32,
    /// Row, 0 at the top, growing southward.
    pub y: u32,
}

impl TileCoordinate {
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Number of tiles along one axis at this zoom level (`2^z`).
    ///
    /// Returns `None` when `z` exceeds [`MAX_ZOOM`].
    pub fn span(&self) -> Option<u64> {
        (self.z <= MAX_ZOOM).then(|| 1u64 << self.z)
    }

    /// True when both `x` and `y` lie inside the `2^z` grid.
    pub fn in_bounds(&self) -> bool {
        match self.span() {
            Some(span) => u64::from(self.x) < span && u64::from(self.y) < span,
            None => false,
        }
    }

    /// The archive row for this coordinate: `(1 << z) - 1 - y`.
    ///
    /// Returns `None` for coordinates outside the grid, which can never have
    /// a stored tile. The conversion is its own inverse.
    pub fn tms_row(&self) -> Option<u32> {
        if !self.in_bounds() {
            return None;
        }
        let span = self.span()?;
        u32::try_from(span - 1 - u64::from(self.y)).ok()
    }
}

/// A tile blob read from the archive.
///
/// The payload is opaque and is never decompressed here. `is_compressed` is
/// derived once from the gzip magic bytes and drives the
/// `Content-Encoding` hint at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    pub data: Vec<u8>,
    pub is_compressed: bool,
}

impl TileRecord {
    pub fn new(data: Vec<u8>) -> Self {
        let is_compressed = is_gzip(&data);
        Self { data, is_compressed }
    }
}

/// True iff `bytes` starts with the gzip magic sequence.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}
