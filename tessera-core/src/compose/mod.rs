//! Palette-indexed layer compositing
//!
//! Ownership is a flat, acyclic hierarchy:
//!
//! - [`Scene`] owns every [`Palette`] and [`Bitmap`] and hands out
//!   [`PaletteId`] / [`BitmapId`] handles.
//! - [`TileGrid`] is a positioned view of one bitmap through one palette.
//!   It owns neither.
//! - [`Group`] is an ordered, back-to-front list of tiles and nested groups.
//!
//! [`Compositor`] flattens a group into RGB565 rows in raster order.

pub mod bitmap;
pub mod compositor;
pub mod group;
pub mod palette;
pub mod scene;
pub mod tile;

pub use bitmap::Bitmap;
pub use compositor::Compositor;
pub use group::{Group, Layer};
pub use palette::Palette;
pub use scene::{BitmapId, PaletteId, Scene};
pub use tile::TileGrid;

/// Compositing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComposeError {
    /// A visible bitmap holds an index its palette does not have
    InvalidIndex {
        /// Bitmap holding the offending cell
        bitmap: BitmapId,
        /// Bitmap column of the offending cell
        x: u16,
        /// Bitmap row of the offending cell
        y: u16,
        /// Stored palette index
        index: u8,
        /// Number of entries in the palette
        palette_len: usize,
    },
    /// Value is not below the bitmap's value count
    ValueOutOfRange {
        /// Rejected value
        value: u8,
        /// Bitmap value count
        value_count: u16,
    },
    /// Coordinates or palette slot outside the object
    OutOfBounds,
    /// Value count or palette size outside 1..=256
    InvalidSize,
    /// Handle does not name a bitmap in this scene
    UnknownBitmap(BitmapId),
    /// Handle does not name a palette in this scene
    UnknownPalette(PaletteId),
    /// Output buffer does not match the frame size
    BufferSize {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },
}
