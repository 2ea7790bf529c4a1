//! Stock init scripts
//!
//! Byte-exact scripts for the panels this driver has been brought up on.

use crate::script::Script;

/// ST7796S on a 320x480 IPS panel, 16-bit RGB565 over 4-wire SPI
///
/// Portrait with mirrored columns and BGR subpixel order (MADCTL 0x48),
/// column inversion, and display inversion on as IPS glass requires.
pub const ST7796S_INIT_BYTES: &[u8] = b"\
\x01\x80\x96\
\x11\x80\x96\
\xF0\x01\xC3\
\xF0\x01\x96\
\x36\x01\x48\
\x3A\x01\x55\
\xB4\x01\x01\
\xB6\x03\x80\x02\x3B\
\x21\x00\
\xF0\x01\x69\
\xF0\x01\x3C\
\x29\x80\x14";

/// [`ST7796S_INIT_BYTES`] as a script
pub const ST7796S_INIT: Script<'static> = Script::new(ST7796S_INIT_BYTES);

/// Native panel width of the ST7796S board in pixels
pub const ST7796S_WIDTH: u16 = 320;

/// Native panel height of the ST7796S board in pixels
pub const ST7796S_HEIGHT: u16 = 480;
