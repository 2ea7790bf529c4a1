//! Color types and RGB565 packing
//!
//! Palettes hold 24-bit colors; the controller is fed 16-bit RGB565.
//! Packing keeps the top 5/6/5 bits of each channel. There is no rounding
//! or dithering, so precision loss is plain truncation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 24-bit RGB color, stored as `0x00RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb888(u32);

impl Rgb888 {
    /// Black
    pub const BLACK: Self = Self(0x000000);
    /// White
    pub const WHITE: Self = Self(0xFFFFFF);
    /// Pure red
    pub const RED: Self = Self(0xFF0000);
    /// Pure green
    pub const GREEN: Self = Self(0x00FF00);
    /// Pure blue
    pub const BLUE: Self = Self(0x0000FF);

    /// Create from individual channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Create from a `0xRRGGBB` literal; bits above 24 are ignored
    pub const fn from_u32(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    /// The color as `0xRRGGBB`
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Red channel
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Pack to RGB565 by truncation
    pub const fn pack(self) -> Rgb565 {
        let r = (self.r() >> 3) as u16;
        let g = (self.g() >> 2) as u16;
        let b = (self.b() >> 3) as u16;
        Rgb565((r << 11) | (g << 5) | b)
    }
}

impl From<u32> for Rgb888 {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

/// Byte order of 16-bit pixels on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ByteOrder {
    /// High byte first; what ST77xx controllers expect over SPI
    #[default]
    BigEndian,
    /// Low byte first
    LittleEndian,
}

/// Packed 16-bit color: 5 bits red, 6 bits green, 5 bits blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(u16);

impl Rgb565 {
    /// Black
    pub const BLACK: Self = Self(0x0000);

    /// Wrap a raw packed value
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw packed value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// 5-bit red channel
    pub const fn r5(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// 6-bit green channel
    pub const fn g6(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// 5-bit blue channel
    pub const fn b5(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Expand to 24 bits by replicating the high bits into the low bits
    ///
    /// Packing the result again yields `self`.
    pub const fn to_rgb888(self) -> Rgb888 {
        let r = self.r5();
        let g = self.g6();
        let b = self.b5();
        Rgb888::new((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    /// Wire bytes in the given order
    pub const fn to_bytes(self, order: ByteOrder) -> [u8; 2] {
        match order {
            ByteOrder::BigEndian => self.0.to_be_bytes(),
            ByteOrder::LittleEndian => self.0.to_le_bytes(),
        }
    }
}

impl From<Rgb888> for Rgb565 {
    fn from(color: Rgb888) -> Self {
        color.pack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_primaries() {
        let red = Rgb888::RED.pack();
        assert_eq!(red.raw(), 0xF800);
        assert_eq!((red.r5(), red.g6(), red.b5()), (0x1F, 0, 0));

        assert_eq!(Rgb888::GREEN.pack().raw(), 0x07E0);
        assert_eq!(Rgb888::BLUE.pack().raw(), 0x001F);
        assert_eq!(Rgb888::BLACK.pack().raw(), 0x0000);
        assert_eq!(Rgb888::WHITE.pack().raw(), 0xFFFF);
    }

    #[test]
    fn test_pack_truncates() {
        // 0x07 in red is below the 5-bit step of 8; it vanishes entirely
        assert_eq!(Rgb888::new(0x07, 0x03, 0x07).pack(), Rgb565::BLACK);
        // Deep blue background from the panel layout
        assert_eq!(Rgb888::from_u32(0x000080).pack().raw(), 0x0010);
    }

    #[test]
    fn test_from_u32_masks_alpha() {
        assert_eq!(Rgb888::from_u32(0xAA12_3456).to_u32(), 0x12_3456);
    }

    #[test]
    fn test_wire_byte_order() {
        let red = Rgb888::RED.pack();
        assert_eq!(red.to_bytes(ByteOrder::BigEndian), [0xF8, 0x00]);
        assert_eq!(red.to_bytes(ByteOrder::LittleEndian), [0x00, 0xF8]);
    }

    #[test]
    fn test_expand_full_scale() {
        assert_eq!(Rgb565::from_raw(0xFFFF).to_rgb888(), Rgb888::WHITE);
        assert_eq!(Rgb565::BLACK.to_rgb888(), Rgb888::BLACK);
    }

    proptest! {
        #[test]
        fn test_pack_is_idempotent(value in 0u32..=0xFF_FFFF) {
            let packed = Rgb888::from_u32(value).pack();
            prop_assert_eq!(packed.to_rgb888().pack(), packed);
        }

        #[test]
        fn test_pack_keeps_top_bits(r: u8, g: u8, b: u8) {
            let packed = Rgb888::new(r, g, b).pack();
            prop_assert_eq!(packed.r5(), r >> 3);
            prop_assert_eq!(packed.g6(), g >> 2);
            prop_assert_eq!(packed.b5(), b >> 3);
        }
    }
}
