//! Display configuration negotiated with the controller
//!
//! The interpreter never looks at opcodes. While a script is replayed the
//! session feeds every sent record through [`DisplayConfig::observe`],
//! which picks out the interface pixel format and the memory access
//! control bits.

use tessera_protocol::opcodes::{self, madctl};
use tessera_protocol::CommandRecord;

/// Interface pixel format selected with `COLMOD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 12 bits per pixel
    Rgb444,
    /// 16 bits per pixel
    Rgb565,
    /// 18 bits per pixel
    Rgb666,
    /// 24 bits per pixel
    Rgb888,
    /// Unrecognized `COLMOD` parameter
    Unknown(u8),
}

impl PixelFormat {
    /// Decode a `COLMOD` parameter
    ///
    /// The low three bits select the MCU/SPI interface format.
    pub const fn from_colmod(param: u8) -> Self {
        match param & 0x07 {
            0b011 => PixelFormat::Rgb444,
            0b101 => PixelFormat::Rgb565,
            0b110 => PixelFormat::Rgb666,
            0b111 => PixelFormat::Rgb888,
            _ => PixelFormat::Unknown(param),
        }
    }

    /// Bits per pixel on the wire
    pub const fn bits_per_pixel(self) -> Option<u8> {
        match self {
            PixelFormat::Rgb444 => Some(12),
            PixelFormat::Rgb565 => Some(16),
            PixelFormat::Rgb666 => Some(18),
            PixelFormat::Rgb888 => Some(24),
            PixelFormat::Unknown(_) => None,
        }
    }
}

/// Memory access control (`MADCTL`) bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation(u8);

impl Orientation {
    /// Wrap a raw `MADCTL` parameter
    pub const fn from_madctl(param: u8) -> Self {
        Self(param)
    }

    /// The raw `MADCTL` parameter
    pub const fn madctl(self) -> u8 {
        self.0
    }

    /// Rows are written bottom to top
    pub const fn rows_reversed(self) -> bool {
        self.0 & madctl::ROW_ORDER != 0
    }

    /// Columns are written right to left
    pub const fn columns_reversed(self) -> bool {
        self.0 & madctl::COLUMN_ORDER != 0
    }

    /// Rows and columns are exchanged (landscape on a portrait panel)
    pub const fn swaps_axes(self) -> bool {
        self.0 & madctl::ROW_COLUMN_EXCHANGE != 0
    }

    /// Panel subpixels are in BGR order
    pub const fn bgr(self) -> bool {
        self.0 & madctl::BGR != 0
    }
}

/// What the controller has been configured to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    panel_width: u16,
    panel_height: u16,
    /// Pixel format from the last `COLMOD`, if any
    pub pixel_format: Option<PixelFormat>,
    /// Orientation from the last `MADCTL`, if any
    pub orientation: Option<Orientation>,
}

impl DisplayConfig {
    /// Configuration for a panel before any script has run
    pub const fn new(panel_width: u16, panel_height: u16) -> Self {
        Self {
            panel_width,
            panel_height,
            pixel_format: None,
            orientation: None,
        }
    }

    /// Update from a record that was sent to the controller
    ///
    /// Returns `true` if the record changed the configuration.
    pub fn observe(&mut self, record: &CommandRecord<'_>) -> bool {
        match (record.opcode, record.data.first()) {
            (opcodes::COLMOD, Some(&param)) => {
                let format = PixelFormat::from_colmod(param);
                let changed = self.pixel_format != Some(format);
                self.pixel_format = Some(format);
                changed
            }
            (opcodes::MADCTL, Some(&param)) => {
                let orientation = Orientation::from_madctl(param);
                let changed = self.orientation != Some(orientation);
                self.orientation = Some(orientation);
                changed
            }
            _ => false,
        }
    }

    /// Both pixel format and orientation have been set
    pub fn is_configured(&self) -> bool {
        self.pixel_format.is_some() && self.orientation.is_some()
    }

    /// Bits per pixel, if the format is known
    pub fn bits_per_pixel(&self) -> Option<u8> {
        self.pixel_format.and_then(PixelFormat::bits_per_pixel)
    }

    /// Width of the addressable surface in the configured orientation
    pub fn width(&self) -> u16 {
        if self.swaps_axes() {
            self.panel_height
        } else {
            self.panel_width
        }
    }

    /// Height of the addressable surface in the configured orientation
    pub fn height(&self) -> u16 {
        if self.swaps_axes() {
            self.panel_width
        } else {
            self.panel_height
        }
    }

    /// Number of pixels in one frame
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    fn swaps_axes(&self) -> bool {
        self.orientation.is_some_and(Orientation::swaps_axes)
    }
}
