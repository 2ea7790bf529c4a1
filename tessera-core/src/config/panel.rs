//! Physical panel description
//!
//! Everything the init script cannot tell us: native resolution, where
//! the visible area starts inside controller RAM, and how to pace and
//! order pixel transfers.

use tessera_protocol::sequences::{ST7796S_HEIGHT, ST7796S_WIDTH};
use tessera_protocol::DelayEncoding;

use crate::color::{ByteOrder, Rgb888};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Native width in pixels (before any row/column exchange)
    pub width: u16,
    /// Native height in pixels
    pub height: u16,
    /// First visible column in controller RAM
    pub column_offset: u16,
    /// First visible row in controller RAM
    pub row_offset: u16,
    /// Pixel byte order on the wire
    pub byte_order: ByteOrder,
    /// Rows per data write when streaming a frame
    pub chunk_rows: u16,
    /// Meaning of script delay bytes
    pub delay_encoding: DelayEncoding,
    /// Color of cells no visible layer covers
    pub background: Rgb888,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: ST7796S_WIDTH,
            height: ST7796S_HEIGHT,
            column_offset: 0,
            row_offset: 0,
            byte_order: ByteOrder::BigEndian,
            chunk_rows: 16,
            delay_encoding: DelayEncoding::Literal,
            background: Rgb888::BLACK,
        }
    }
}

impl PanelConfig {
    /// Panel of the given native size with default settings
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the RAM offset of the visible area
    pub fn with_offset(mut self, column_offset: u16, row_offset: u16) -> Self {
        self.column_offset = column_offset;
        self.row_offset = row_offset;
        self
    }

    /// Set the wire byte order
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Set rows per data write (at least one)
    pub fn with_chunk_rows(mut self, chunk_rows: u16) -> Self {
        self.chunk_rows = chunk_rows.max(1);
        self
    }

    /// Set the delay byte interpretation
    pub fn with_delay_encoding(mut self, delay_encoding: DelayEncoding) -> Self {
        self.delay_encoding = delay_encoding;
        self
    }

    /// Set the background color
    pub fn with_background(mut self, background: Rgb888) -> Self {
        self.background = background;
        self
    }
}
