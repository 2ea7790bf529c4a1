//! Transport implementations
//!
//! This crate provides concrete implementations of
//! [`tessera_hal::DisplayBus`] on top of `embedded-hal` 1.0 peripherals:
//!
//! - 4-wire SPI (SCK/MOSI plus D/C, CS and an optional reset line)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod fourwire;

pub use fourwire::{FourWire, NoPin};
