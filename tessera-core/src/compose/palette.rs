//! Color tables

use alloc::vec::Vec;

use super::ComposeError;
use crate::color::{Rgb565, Rgb888};

/// Largest palette; bitmap cells are single bytes
pub const MAX_PALETTE_LEN: usize = 256;

/// One palette slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PaletteEntry {
    color: Rgb888,
    packed: Rgb565,
    transparent: bool,
}

impl PaletteEntry {
    fn new(color: Rgb888) -> Self {
        Self {
            color,
            packed: color.pack(),
            transparent: false,
        }
    }

    /// The 24-bit color
    pub fn color(&self) -> Rgb888 {
        self.color
    }

    /// The color packed for the wire
    pub fn packed(&self) -> Rgb565 {
        self.packed
    }

    /// Whether lower layers show through this slot
    pub fn is_transparent(&self) -> bool {
        self.transparent
    }
}

/// Mapping from index `0..len` to color
///
/// The length is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Create a palette of `len` black, opaque entries
    pub fn new(len: usize) -> Result<Self, ComposeError> {
        if len == 0 || len > MAX_PALETTE_LEN {
            return Err(ComposeError::InvalidSize);
        }
        Ok(Self {
            entries: alloc::vec![PaletteEntry::new(Rgb888::BLACK); len],
        })
    }

    /// Create a palette holding `colors` in order
    pub fn from_colors(colors: &[Rgb888]) -> Result<Self, ComposeError> {
        if colors.is_empty() || colors.len() > MAX_PALETTE_LEN {
            return Err(ComposeError::InvalidSize);
        }
        Ok(Self {
            entries: colors.iter().copied().map(PaletteEntry::new).collect(),
        })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; palettes have at least one entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`
    pub fn get(&self, index: u8) -> Option<&PaletteEntry> {
        self.entries.get(index as usize)
    }

    /// Set the color of an entry
    pub fn set(&mut self, index: u8, color: Rgb888) -> Result<(), ComposeError> {
        let entry = self
            .entries
            .get_mut(index as usize)
            .ok_or(ComposeError::OutOfBounds)?;
        entry.color = color;
        entry.packed = color.pack();
        Ok(())
    }

    /// Make an entry transparent
    pub fn make_transparent(&mut self, index: u8) -> Result<(), ComposeError> {
        self.set_transparent(index, true)
    }

    /// Make an entry opaque again
    pub fn make_opaque(&mut self, index: u8) -> Result<(), ComposeError> {
        self.set_transparent(index, false)
    }

    fn set_transparent(&mut self, index: u8, transparent: bool) -> Result<(), ComposeError> {
        self.entries
            .get_mut(index as usize)
            .ok_or(ComposeError::OutOfBounds)?
            .transparent = transparent;
        Ok(())
    }
}
