//! Board-agnostic core logic for the display driver
//!
//! This crate contains everything that does not depend on a specific
//! transport implementation:
//!
//! - Init-script replay over any [`tessera_hal::DisplayBus`]
//! - Controller lifecycle state machine
//! - Display and panel configuration types
//! - RGB888 to RGB565 packing
//! - Palette-indexed layer compositor

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod color;
pub mod compose;
pub mod config;
pub mod init;
pub mod state;

pub use color::{ByteOrder, Rgb565, Rgb888};
pub use compose::{
    Bitmap, BitmapId, ComposeError, Compositor, Group, Layer, Palette, PaletteId, Scene, TileGrid,
};
pub use config::{DisplayConfig, Orientation, PanelConfig, PixelFormat};
pub use init::{run_script, InitError, RecordObserver};
pub use state::{ControllerEvent, ControllerState};
