//! Display session for ST77xx-class serial panels
//!
//! This crate ties the pieces together:
//! - [`DisplaySession`] brings a controller up by replaying an init script
//!   and then accepts composed frames
//! - [`SharedDisplay`] serializes access to a session held by several callers
//! - [`SessionError`] collects every failure the lower layers can report
//!
//! # Architecture
//!
//! ```text
//!   Scene + Group ──► Compositor ──► frame buffer (RGB565 wire bytes)
//!                                         │
//!   init Script ──► run_script ──┐        │ CASET / RASET / RAMWR + data
//!                                ▼        ▼
//!                        DisplaySession<B: DisplayBus>
//!                                │
//!                                ▼
//!                   FourWire (SPI + DC/CS/RST + delay)
//! ```
//!
//! A frame is rendered completely before the first byte leaves, so a scene
//! that fails to compose never disturbs what the panel is showing.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod error;
pub mod session;
pub mod shared;

pub use error::SessionError;
pub use session::DisplaySession;
pub use shared::SharedDisplay;
