//! Tessera Hardware Abstraction Layer
//!
//! This crate defines the bus trait that display drivers are written
//! against. A chip- or board-specific transport implements it once and
//! every layer above (script interpreter, session) stays portable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tessera-display (session, commit)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tessera-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   FourWire    │       │ RecordingBus  │
//! │ (embedded-hal)│       │    (mock)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::DisplayBus`] - Command/data discriminated serial link

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "mock"))]
extern crate alloc;

pub mod bus;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use bus::{BusError, DisplayBus, Mode};
#[cfg(any(test, feature = "mock"))]
pub use mock::{BusOp, RecordingBus};
