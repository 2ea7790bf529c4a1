//! Owner of palettes and bitmaps

use alloc::vec::Vec;

use super::{Bitmap, ComposeError, Palette};

/// Handle to a bitmap in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitmapId(usize);

/// Handle to a palette in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PaletteId(usize);

/// Arena of palettes and bitmaps
///
/// Items are never removed, so handles stay valid for the scene's life.
/// A palette may be shared by any number of tiles.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    palettes: Vec<Palette>,
    bitmaps: Vec<Bitmap>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a palette
    pub fn add_palette(&mut self, palette: Palette) -> PaletteId {
        self.palettes.push(palette);
        PaletteId(self.palettes.len() - 1)
    }

    /// Take ownership of a bitmap
    pub fn add_bitmap(&mut self, bitmap: Bitmap) -> BitmapId {
        self.bitmaps.push(bitmap);
        BitmapId(self.bitmaps.len() - 1)
    }

    /// Look up a palette
    pub fn palette(&self, id: PaletteId) -> Result<&Palette, ComposeError> {
        self.palettes
            .get(id.0)
            .ok_or(ComposeError::UnknownPalette(id))
    }

    /// Look up a palette for modification
    pub fn palette_mut(&mut self, id: PaletteId) -> Result<&mut Palette, ComposeError> {
        self.palettes
            .get_mut(id.0)
            .ok_or(ComposeError::UnknownPalette(id))
    }

    /// Look up a bitmap
    pub fn bitmap(&self, id: BitmapId) -> Result<&Bitmap, ComposeError> {
        self.bitmaps
            .get(id.0)
            .ok_or(ComposeError::UnknownBitmap(id))
    }

    /// Look up a bitmap for modification
    pub fn bitmap_mut(&mut self, id: BitmapId) -> Result<&mut Bitmap, ComposeError> {
        self.bitmaps
            .get_mut(id.0)
            .ok_or(ComposeError::UnknownBitmap(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb888;

    #[test]
    fn test_handles_resolve() {
        let mut scene = Scene::new();
        let p = scene.add_palette(Palette::from_colors(&[Rgb888::RED]).unwrap());
        let b = scene.add_bitmap(Bitmap::new(2, 2, 1).unwrap());

        assert_eq!(scene.palette(p).unwrap().len(), 1);
        assert_eq!(scene.bitmap(b).unwrap().width(), 2);

        scene.bitmap_mut(b).unwrap().set(1, 1, 0).unwrap();
        scene.palette_mut(p).unwrap().set(0, Rgb888::BLUE).unwrap();
        assert_eq!(
            scene.palette(p).unwrap().get(0).unwrap().color(),
            Rgb888::BLUE
        );
    }

    #[test]
    fn test_foreign_handles_are_rejected() {
        let mut other = Scene::new();
        other.add_palette(Palette::new(1).unwrap());
        let p = other.add_palette(Palette::new(1).unwrap());
        let b = other.add_bitmap(Bitmap::new(1, 1, 1).unwrap());

        let scene = Scene::new();
        assert_eq!(scene.palette(p).err(), Some(ComposeError::UnknownPalette(p)));
        assert_eq!(scene.bitmap(b).err(), Some(ComposeError::UnknownBitmap(b)));
    }

    #[test]
    fn test_handles_stay_distinct_past_u16_range() {
        let mut scene = Scene::new();
        let first = scene.add_palette(Palette::new(1).unwrap());
        for _ in 0..u16::MAX {
            scene.add_palette(Palette::new(1).unwrap());
        }
        let last = scene.add_palette(Palette::new(2).unwrap());

        assert_ne!(last, first);
        assert_eq!(scene.palette(first).unwrap().len(), 1);
        assert_eq!(scene.palette(last).unwrap().len(), 2);
    }
}
