//! Configuration types
//!
//! [`PanelConfig`] describes the physical board and is supplied by the
//! caller. [`DisplayConfig`] is what the controller was actually told
//! during script replay; it is established once and then fixed.

pub mod display;
pub mod panel;

pub use display::*;
pub use panel::*;
