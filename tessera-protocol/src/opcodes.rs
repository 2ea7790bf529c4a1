//! ST77xx opcode constants
//!
//! Only the opcodes the driver itself issues or recognizes while replaying
//! an init script are named here. The interpreter accepts any byte.

/// Software reset; the controller returns to sleep-in mode
pub const SWRESET: u8 = 0x01;
/// Sleep in
pub const SLPIN: u8 = 0x10;
/// Sleep out
pub const SLPOUT: u8 = 0x11;
/// Display inversion off
pub const INVOFF: u8 = 0x20;
/// Display inversion on
pub const INVON: u8 = 0x21;
/// Display off
pub const DISPOFF: u8 = 0x28;
/// Display on
pub const DISPON: u8 = 0x29;
/// Column address set
pub const CASET: u8 = 0x2A;
/// Row address set
pub const RASET: u8 = 0x2B;
/// Memory write
pub const RAMWR: u8 = 0x2C;
/// Memory data access control (scan direction, row/column exchange, BGR)
pub const MADCTL: u8 = 0x36;
/// Interface pixel format
pub const COLMOD: u8 = 0x3A;
/// Display inversion control
pub const DIC: u8 = 0xB4;
/// Display function control
pub const DFC: u8 = 0xB6;
/// Command set control (extension command lock/unlock)
pub const CSCON: u8 = 0xF0;

/// `CSCON` parameter keys
pub mod cscon {
    /// Enable extension command 2 part I
    pub const UNLOCK_PART1: u8 = 0xC3;
    /// Enable extension command 2 part II
    pub const UNLOCK_PART2: u8 = 0x96;
    /// Disable extension command 2 part I
    pub const LOCK_PART1: u8 = 0x3C;
    /// Disable extension command 2 part II
    pub const LOCK_PART2: u8 = 0x69;
}

/// `MADCTL` parameter bits
pub mod madctl {
    /// Row address order (MY)
    pub const ROW_ORDER: u8 = 0x80;
    /// Column address order (MX)
    pub const COLUMN_ORDER: u8 = 0x40;
    /// Row/column exchange (MV)
    pub const ROW_COLUMN_EXCHANGE: u8 = 0x20;
    /// Vertical refresh order (ML)
    pub const VERTICAL_REFRESH: u8 = 0x10;
    /// BGR subpixel order
    pub const BGR: u8 = 0x08;
    /// Horizontal refresh order (MH)
    pub const HORIZONTAL_REFRESH: u8 = 0x04;
}
