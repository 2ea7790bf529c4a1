//! Tile placements

use super::scene::{BitmapId, PaletteId};

/// A bitmap shown through a palette at an offset
///
/// Non-owning: the bitmap and palette live in a [`Scene`](super::Scene).
/// Parts that fall outside the surface are clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TileGrid {
    /// Bitmap to show
    pub bitmap: BitmapId,
    /// Palette to color it with
    pub palette: PaletteId,
    /// Column of the bitmap's left edge, relative to the parent group
    pub x: i32,
    /// Row of the bitmap's top edge, relative to the parent group
    pub y: i32,
    /// Hidden tiles are skipped entirely
    pub hidden: bool,
}

impl TileGrid {
    /// Place a bitmap at the parent's origin
    pub const fn new(bitmap: BitmapId, palette: PaletteId) -> Self {
        Self {
            bitmap,
            palette,
            x: 0,
            y: 0,
            hidden: false,
        }
    }

    /// Move to an offset
    pub const fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set visibility
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}
